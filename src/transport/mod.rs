//! Transport layer for reaching the assistant backend
//!
//! This module provides the transport abstraction, the request/response
//! shapes that cross it, and the credential the HTTP implementation carries.

pub mod http;

use std::sync::Arc;

use reqwest::Method;
use reqwest::cookie::Jar;

use crate::error::{AssistantError, Result};

// ============================================================================
// Endpoints
// ============================================================================

/// Logical backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Current user for the attached credential
    UserInfo,
    /// Send a one-time code to an email
    InitiateAuth,
    /// Exchange email + code for a session cookie
    VerifyCode,
    /// End the server-side session
    Logout,
    /// Ask the assistant a question
    Chat,
    /// Analyse an uploaded document
    ProcessDocument,
    /// Liveness probe
    Health,
}

impl Endpoint {
    /// Path relative to the API root
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::UserInfo => "/user-info",
            Self::InitiateAuth => "/initiate-auth",
            Self::VerifyCode => "/verify-code",
            Self::Logout => "/logout",
            Self::Chat => "/chat",
            Self::ProcessDocument => "/process-document",
            Self::Health => "/health",
        }
    }

    /// HTTP method
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::UserInfo | Self::Health => Method::GET,
            _ => Method::POST,
        }
    }
}

// ============================================================================
// Requests and responses
// ============================================================================

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(serde_json::Value),
    /// Single-file multipart form
    Multipart {
        /// Form field name
        field: &'static str,
        /// File name sent with the part
        file_name: String,
        /// File contents
        contents: Vec<u8>,
    },
}

/// A request ready to hand to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Target operation
    pub endpoint: Endpoint,
    /// Payload
    pub body: RequestBody,
    /// Whether the session credential is attached
    pub with_credentials: bool,
}

impl ApiRequest {
    /// Request with no body
    #[must_use]
    pub const fn empty(endpoint: Endpoint, with_credentials: bool) -> Self {
        Self {
            endpoint,
            body: RequestBody::Empty,
            with_credentials,
        }
    }

    /// Request with a JSON body
    #[must_use]
    pub const fn json(endpoint: Endpoint, body: serde_json::Value, with_credentials: bool) -> Self {
        Self {
            endpoint,
            body: RequestBody::Json(body),
            with_credentials,
        }
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// Transport trait
// ============================================================================

/// Transport trait for reaching the backend
///
/// Implementations perform exactly one exchange per call, with no retries.
/// Any failure to obtain a status and body is a `Request` error.
pub trait Transport: Send + Sync + 'static {
    /// Perform one request
    ///
    /// # Errors
    /// Returns `AssistantError::Request` if no response could be obtained
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<RawResponse>> + Send;
}

// ============================================================================
// Credential
// ============================================================================

/// Session credential carried by the HTTP transport
///
/// Wraps a cookie jar shared with the HTTP client; the backend sets the
/// session cookie on a successful verify and clears it on logout.
#[derive(Clone, Default)]
pub struct Credential {
    jar: Arc<Jar>,
}

impl Credential {
    /// Empty credential
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credential preloaded with a session cookie (`name=value`) for `url`
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `url` does not parse
    pub fn with_session_cookie(url: &str, cookie: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| AssistantError::invalid_config(format!("cookie URL '{url}': {e}")))?;
        let credential = Self::new();
        credential.jar.add_cookie_str(cookie, &url);
        Ok(credential)
    }

    pub(crate) fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("jar", &"<cookies>").finish()
    }
}

pub use http::HttpTransport;
