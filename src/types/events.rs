//! Render deltas emitted by the controllers
//!
//! Controllers never draw anything. They push `UiEvent`s onto a channel and a
//! rendering layer (the terminal front end, or a test) consumes them.

use tokio::sync::mpsc;

use super::identity::UserIdentity;
use super::messages::{ChatMessage, ChatStatistics};
use super::upload::UploadResult;

/// Tone of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Work in progress
    Info,
    /// Step completed
    Success,
    /// Step failed
    Error,
}

/// Backend reachability as seen by the connection monitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No probe has completed yet
    #[default]
    Unknown,
    /// Last probe succeeded
    Online,
    /// Last probe failed
    Offline,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("Connecting..."),
            Self::Online => f.write_str("Online"),
            Self::Offline => f.write_str("Offline"),
        }
    }
}

/// A change the rendering layer should reflect
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show the login view
    ShowAuthView,
    /// Show the main chat view
    ShowMainView,
    /// Move the login form to the code step
    ShowCodeStep {
        /// Address the code was sent to
        email: String,
    },
    /// Move the login form back to the email step and blank it
    ShowEmailStep,
    /// Status line on the login form
    AuthStatus {
        /// Text to display
        message: String,
        /// Tone
        kind: StatusKind,
    },
    /// Hide the login status line
    ClearAuthStatus,
    /// Signed-in user changed
    UserChanged(Option<UserIdentity>),
    /// A message was appended to the conversation
    MessageAppended(ChatMessage),
    /// Pending-response indicator shown (`true`) or removed (`false`)
    Pending(bool),
    /// Chat statistics changed
    StatisticsChanged(ChatStatistics),
    /// Conversation was cleared
    ConversationCleared,
    /// Status line on the upload panel
    UploadStatus {
        /// Text to display
        message: String,
        /// Tone
        kind: StatusKind,
    },
    /// Analysis for an uploaded document, replacing any previous one
    UploadCompleted {
        /// Name of the analysed file
        file_name: String,
        /// Analysis
        result: UploadResult,
    },
    /// Backend reachability changed
    ConnectionChanged(ConnectionStatus),
}

/// Sending half of the render channel
///
/// Emitting never fails: once the rendering layer drops its receiver, events
/// are discarded.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventSink {
    /// Create a sink and the receiver the rendering layer reads from
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Push an event to the rendering layer
    pub fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("render channel closed; event dropped");
        }
    }
}
