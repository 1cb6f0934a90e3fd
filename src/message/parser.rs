//! Envelope parser for backend responses

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AssistantError, Result};
use crate::transport::RawResponse;
use crate::types::{MessageMetadata, UploadResult, UserIdentity};

/// `status` value the backend uses for success
const STATUS_SUCCESS: &str = "success";

/// Message used when the backend fails without saying why
const UNSPECIFIED_FAILURE: &str = "Request failed";

// ============================================================================
// Payloads
// ============================================================================

/// Body of initiate-auth, verify-code, and logout answers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AckPayload {
    /// Optional human-readable note
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a user-info answer
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoPayload {
    /// Signed-in user
    pub user: UserIdentity,
}

/// Body of a chat answer
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPayload {
    /// Answer text
    pub response: String,
    /// Confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Topic category
    #[serde(default)]
    pub category: Option<String>,
    /// Server-side processing time in seconds
    #[serde(default)]
    pub processing_time: Option<f64>,
}

impl ChatPayload {
    /// Metadata to attach to the assistant message, if the backend sent any
    #[must_use]
    pub fn metadata(&self) -> Option<MessageMetadata> {
        let confidence = self.confidence?;
        Some(MessageMetadata {
            confidence: confidence.clamp(0.0, 1.0),
            category: self.category.clone().unwrap_or_default(),
            processing_time_seconds: self.processing_time.unwrap_or_default(),
        })
    }
}

/// Body of a process-document answer
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentPayload {
    /// Analysis of the document
    pub result: UploadResult,
}

// ============================================================================
// Parsing
// ============================================================================

/// Classify a raw response and return its JSON body on success
///
/// - 2xx with `status == "success"`: the body
/// - 2xx with another status: `Application` failure with the backend message
/// - non-2xx with a `message` in the body: `Application` failure
/// - anything else: `Request` failure
///
/// # Errors
/// Returns `Application` or `Request` as described above
pub fn parse_envelope(response: &RawResponse) -> Result<serde_json::Value> {
    let body: serde_json::Value = match serde_json::from_slice(&response.body) {
        Ok(body) => body,
        Err(e) if response.is_success() => {
            return Err(AssistantError::request(format!(
                "malformed response body: {e}"
            )));
        }
        Err(_) => return Err(AssistantError::request(format!("HTTP {}", response.status))),
    };

    let message = body
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);

    if !response.is_success() {
        return Err(match message {
            Some(message) => AssistantError::application(message),
            None => AssistantError::request(format!("HTTP {}", response.status)),
        });
    }

    match body.get("status").and_then(serde_json::Value::as_str) {
        Some(STATUS_SUCCESS) => Ok(body),
        _ => Err(AssistantError::application(
            message.unwrap_or_else(|| UNSPECIFIED_FAILURE.to_string()),
        )),
    }
}

/// Deserialize a successful body into a typed payload
///
/// # Errors
/// Returns `Request` if required fields are missing or mistyped
pub fn parse_payload<T: DeserializeOwned>(body: serde_json::Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| AssistantError::request(format!("unexpected response shape: {e}")))
}
