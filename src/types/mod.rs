//! Type definitions for the assistant client
//!
//! - [`identity`] - `Session` and `UserIdentity`
//! - [`auth`] - `AuthFlowState` for the two-step login
//! - [`messages`] - chat messages, statistics, and the conversation
//! - [`upload`] - documents and their analysis results
//! - [`events`] - render deltas emitted by the controllers
//! - [`options`] - client configuration

pub mod auth;
pub mod events;
pub mod identity;
pub mod messages;
pub mod options;
pub mod upload;

pub use auth::AuthFlowState;
pub use events::{ConnectionStatus, EventSink, StatusKind, UiEvent};
pub use identity::{Session, UserIdentity};
pub use messages::{ChatMessage, ChatStatistics, Conversation, MessageMetadata, Sender};
pub use options::{ClientOptions, ClientOptionsBuilder};
pub use upload::{DocumentFile, UploadResult};
