//! Error types for the assistant client
//!
//! Three kinds of failure reach the controllers: local validation failures
//! (never sent to the backend), request failures (transport, non-2xx without
//! a backend message, malformed bodies), and application failures (the
//! backend answered and said no). Controllers turn all of them into
//! user-visible messages.

use thiserror::Error;

/// Maximum accepted document size in megabytes, as shown to users
const MAX_UPLOAD_MB: u64 = 10;

/// Local, pre-network validation failures
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email does not look like `local@domain.tld`
    #[error("Please enter a valid organization email")]
    InvalidEmail,

    /// Verification code is not exactly six characters
    #[error("Please enter a valid 6-digit code")]
    InvalidCode,

    /// File extension is not on the allow-list
    #[error("Please select a PDF, DOCX, or TXT file.")]
    UnsupportedFileType {
        /// Name of the rejected file
        file_name: String,
    },

    /// File exceeds the upload ceiling
    #[error("File size must be less than {MAX_UPLOAD_MB}MB.")]
    FileTooLarge {
        /// Size of the rejected file in bytes
        size: u64,
    },
}

/// Operations that allow only one request in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Email submission or code verification
    Auth,
    /// Chat message
    Chat,
    /// Document upload
    Upload,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => f.write_str("authentication"),
            Self::Chat => f.write_str("chat"),
            Self::Upload => f.write_str("upload"),
        }
    }
}

/// Main error type for the assistant client
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Input rejected locally before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network unreachable, non-2xx status, or malformed response body
    #[error("Request failed: {0}")]
    Request(String),

    /// Backend answered but reported a logical failure
    #[error("{0}")]
    Application(String),

    /// Another request of the same kind is still pending
    #[error("Another {0} request is already in progress")]
    Busy(Operation),

    /// Operation is not valid in the current auth flow state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// I/O error (reading a document from disk)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for assistant client operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// Create a request failure
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create an application failure carrying the backend's message
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this failure happened before reaching the network
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Busy(_) | Self::InvalidState(_) | Self::InvalidConfig(_)
        )
    }

    /// Text to show the user for this failure
    ///
    /// `fallback` replaces request failures, whose raw text (socket errors,
    /// status codes) is logged rather than displayed.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Application(msg) => msg.clone(),
            Self::Busy(_) | Self::InvalidState(_) => self.to_string(),
            Self::Request(_) | Self::InvalidConfig(_) | Self::JsonDecode(_) | Self::Io(_) => {
                fallback.to_string()
            }
        }
    }
}
