//! Client options and configuration
//!
//! This module contains the configuration for the assistant client, a builder
//! for assembling it in code, and loading from environment variables.

use std::time::Duration;

use crate::error::{AssistantError, Result};

// ============================================================================
// Defaults
// ============================================================================

/// Backend API root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Interval between connection probes
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Pause between "Authentication successful!" and switching to the main view
pub const DEFAULT_AUTH_TRANSITION_DELAY: Duration = Duration::from_secs(1);

/// Environment variable overriding the API root
pub const ENV_API_URL: &str = "ASSISTANT_API_URL";

/// Environment variable overriding the probe interval, in seconds
pub const ENV_HEALTH_INTERVAL_SECS: &str = "ASSISTANT_HEALTH_INTERVAL_SECS";

/// Environment variable setting a transport timeout, in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "ASSISTANT_REQUEST_TIMEOUT_SECS";

// ============================================================================
// Client Options
// ============================================================================

/// Main options for the assistant client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API root, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Interval between connection probes
    pub health_interval: Duration,
    /// Transport-level timeout; `None` leaves it to the HTTP stack
    pub request_timeout: Option<Duration>,
    /// Pause after a successful verify before the main view is shown
    pub auth_transition_delay: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_interval: DEFAULT_HEALTH_INTERVAL,
            request_timeout: None,
            auth_transition_delay: DEFAULT_AUTH_TRANSITION_DELAY,
            user_agent: concat!("assistant-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Create a new builder for `ClientOptions`
    #[must_use]
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Load options from the process environment
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable is set but malformed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable is set but malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(url) = lookup(ENV_API_URL) {
            builder = builder.base_url(url);
        }
        if let Some(secs) = lookup(ENV_HEALTH_INTERVAL_SECS) {
            builder = builder.health_interval(parse_secs(ENV_HEALTH_INTERVAL_SECS, &secs)?);
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            builder = builder.request_timeout(parse_secs(ENV_REQUEST_TIMEOUT_SECS, &secs)?);
        }
        builder.build()
    }

    /// Full URL for an API path such as `/chat`
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Check that the options are usable
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a non-http(s) base URL or a zero probe interval
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AssistantError::invalid_config(format!("base URL '{}': {e}", self.base_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AssistantError::invalid_config(format!(
                "unsupported scheme '{}' (only http/https allowed)",
                url.scheme()
            )));
        }
        if self.health_interval.is_zero() {
            return Err(AssistantError::invalid_config(
                "health interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| AssistantError::invalid_config(format!("{key}='{value}': {e}")))
}

// ============================================================================
// Builder for ClientOptions
// ============================================================================

/// Builder for `ClientOptions`
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl ClientOptionsBuilder {
    /// Set the API root
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.base_url = url.into();
        self
    }

    /// Set the probe interval
    #[must_use]
    pub const fn health_interval(mut self, interval: Duration) -> Self {
        self.options.health_interval = interval;
        self
    }

    /// Set a transport-level timeout
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }

    /// Set the pause before the main view is shown after login
    #[must_use]
    pub const fn auth_transition_delay(mut self, delay: Duration) -> Self {
        self.options.auth_transition_delay = delay;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.options.user_agent = agent.into();
        self
    }

    /// Validate and build the `ClientOptions`
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the options fail validation
    pub fn build(self) -> Result<ClientOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
