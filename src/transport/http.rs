//! reqwest-backed transport
//!
//! Two pooled clients share one configuration: one attaches the credential's
//! cookie jar, the other never sends or stores cookies.

use reqwest::multipart::{Form, Part};

use super::{ApiRequest, Credential, RawResponse, RequestBody, Transport};
use crate::error::{AssistantError, Result};
use crate::types::ClientOptions;

/// HTTP transport for the assistant backend
#[derive(Debug, Clone)]
pub struct HttpTransport {
    options: ClientOptions,
    with_cookies: reqwest::Client,
    anonymous: reqwest::Client,
}

impl HttpTransport {
    /// Build the HTTP clients
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the options are invalid or the TLS backend
    /// cannot be initialised
    pub fn new(options: ClientOptions, credential: &Credential) -> Result<Self> {
        options.validate()?;

        let builder = || {
            let builder = reqwest::Client::builder().user_agent(options.user_agent.clone());
            match options.request_timeout {
                Some(timeout) => builder.timeout(timeout),
                None => builder,
            }
        };
        let with_cookies = builder()
            .cookie_provider(credential.jar())
            .build()
            .map_err(|e| AssistantError::invalid_config(format!("HTTP client: {e}")))?;
        let anonymous = builder()
            .build()
            .map_err(|e| AssistantError::invalid_config(format!("HTTP client: {e}")))?;

        Ok(Self {
            options,
            with_cookies,
            anonymous,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.options.endpoint_url(request.endpoint.path());
        let client = if request.with_credentials {
            &self.with_cookies
        } else {
            &self.anonymous
        };

        log::debug!("{} {url}", request.endpoint.method());
        let builder = client.request(request.endpoint.method(), &url);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart {
                field,
                file_name,
                contents,
            } => builder.multipart(Form::new().part(field, Part::bytes(contents).file_name(file_name))),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| AssistantError::request(format!("{url}: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| AssistantError::request(format!("{url}: failed to read body: {e}")))?;
        log::debug!("{url} -> {status} ({} bytes)", body.len());

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
