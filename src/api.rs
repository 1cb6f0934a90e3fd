//! Typed API client
//!
//! One method per backend operation. Each performs a single exchange through
//! the [`Transport`] and returns either the typed payload or a classified
//! failure; nothing panics and nothing is retried.

use std::sync::Arc;

use serde_json::json;

use crate::error::{AssistantError, Result};
use crate::message::{
    AckPayload, ChatPayload, DocumentPayload, UserInfoPayload, parse_envelope, parse_payload,
};
use crate::transport::{ApiRequest, Credential, Endpoint, HttpTransport, RequestBody, Transport};
use crate::types::{ClientOptions, UploadResult, UserIdentity};

/// Multipart field the backend reads the document from
pub const DOCUMENT_FIELD: &str = "document";

/// Client for the assistant backend
pub struct ApiClient<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Create a client over HTTP
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP transport cannot be built
    pub fn http(options: ClientOptions, credential: &Credential) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(options, credential)?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Underlying transport
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let endpoint = request.endpoint;
        let raw = self.transport.send(request).await?;
        let result = parse_envelope(&raw);
        if let Err(e) = &result {
            log::debug!("{endpoint:?} failed: {e}");
        }
        result
    }

    /// Fetch the user bound to the current credential
    ///
    /// # Errors
    /// Fails when no valid session exists or the backend is unreachable
    pub async fn current_user(&self) -> Result<UserIdentity> {
        let body = self
            .call(ApiRequest::empty(Endpoint::UserInfo, true))
            .await?;
        Ok(parse_payload::<UserInfoPayload>(body)?.user)
    }

    /// Ask the backend to email a one-time code
    ///
    /// # Errors
    /// Fails when the backend rejects the address or is unreachable
    pub async fn initiate_auth(&self, email: &str) -> Result<AckPayload> {
        let body = self
            .call(ApiRequest::json(
                Endpoint::InitiateAuth,
                json!({ "email": email }),
                false,
            ))
            .await?;
        parse_payload(body)
    }

    /// Exchange email and code for a session cookie
    ///
    /// # Errors
    /// Fails when the code is wrong or the backend is unreachable
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<AckPayload> {
        let body = self
            .call(ApiRequest::json(
                Endpoint::VerifyCode,
                json!({ "email": email, "code": code }),
                true,
            ))
            .await?;
        parse_payload(body)
    }

    /// End the server-side session
    ///
    /// # Errors
    /// Fails when the backend is unreachable or refuses
    pub async fn logout(&self) -> Result<()> {
        self.call(ApiRequest::empty(Endpoint::Logout, true))
            .await
            .map(|_| ())
    }

    /// Send a chat message
    ///
    /// # Errors
    /// Fails when the backend cannot answer or is unreachable
    pub async fn chat(&self, message: &str) -> Result<ChatPayload> {
        let body = self
            .call(ApiRequest::json(
                Endpoint::Chat,
                json!({ "message": message }),
                true,
            ))
            .await?;
        parse_payload(body)
    }

    /// Upload a document for analysis
    ///
    /// # Errors
    /// Fails when the backend cannot process the file or is unreachable
    pub async fn process_document(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResult> {
        let request = ApiRequest {
            endpoint: Endpoint::ProcessDocument,
            body: RequestBody::Multipart {
                field: DOCUMENT_FIELD,
                file_name: file_name.to_string(),
                contents,
            },
            with_credentials: true,
        };
        let body = self.call(request).await?;
        Ok(parse_payload::<DocumentPayload>(body)?.result)
    }

    /// Liveness probe; any 2xx counts as healthy
    ///
    /// # Errors
    /// Returns `Request` for transport errors and non-2xx statuses
    pub async fn health(&self) -> Result<()> {
        let raw = self
            .transport
            .send(ApiRequest::empty(Endpoint::Health, false))
            .await?;
        if raw.is_success() {
            Ok(())
        } else {
            Err(AssistantError::request(format!("HTTP {}", raw.status)))
        }
    }
}
