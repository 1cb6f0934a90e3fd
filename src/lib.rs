//! # Intelligent Enterprise Assistant client
//!
//! A Rust client for the Intelligent Enterprise Assistant web service: email +
//! one-time-code login, chat with running statistics, document upload and
//! analysis, and a background connection monitor. All inference, parsing, and
//! authentication logic lives in the backend; this crate is the client-side
//! state machine and request orchestration around it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use assistant_client::{Assistant, ClientOptions, Credential, render};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ClientOptions::builder()
//!         .base_url("http://localhost:5000/api")
//!         .build()?;
//!     let mut assistant = Assistant::connect(options, Credential::new())?;
//!     let mut events = assistant.take_event_receiver().expect("receiver");
//!
//!     assistant.submit_email("a@corp.com").await?;
//!     assistant.submit_code("123456").await?;
//!     assistant.send("How many vacation days do I have?").await?;
//!
//!     while let Ok(event) = events.try_recv() {
//!         if let Some(line) = render::render_event(&event) {
//!             println!("{line}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`]: session, conversation, upload, event, and option types
//! - [`validation`]: local checks that run before any request
//! - [`transport`]: the [`Transport`] trait and its reqwest implementation
//! - [`message`]: response envelope parsing
//! - [`api`]: one typed method per backend operation
//! - [`client`]: the [`Assistant`] controller (auth, chat, upload)
//! - [`monitor`]: periodic liveness probe
//! - [`render`]: plain-text rendering of [`UiEvent`]s
//! - [`error`]: error taxonomy

pub mod api;
pub mod client;
pub mod error;
pub mod message;
pub mod monitor;
pub mod render;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export commonly used types for external API
pub use api::ApiClient;
pub use client::{Assistant, ChatOutcome};
pub use error::{AssistantError, Operation, Result, ValidationError};
pub use monitor::ConnectionMonitor;
pub use transport::{ApiRequest, Credential, Endpoint, HttpTransport, RawResponse, RequestBody, Transport};
pub use types::{
    AuthFlowState, ChatMessage, ChatStatistics, ClientOptions, ClientOptionsBuilder,
    ConnectionStatus, DocumentFile, EventSink, MessageMetadata, Sender, Session, StatusKind,
    UiEvent, UploadResult, UserIdentity,
};
