//! `Assistant`: the controller layer
//!
//! This module owns the application state and drives the API client in
//! response to user commands:
//! - Two-step email + code login (`auth`)
//! - Chat with running response-time statistics (`chat`)
//! - Document upload and analysis (`upload`)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  command   ┌──────────────────────┐  request  ┌───────────┐
//! │ front end    │──────────→│      Assistant        │─────────→│ ApiClient │
//! │ (renderer)   │            │                      │           │ Transport │
//! │              │←──────────│ state: Mutex<AppState>│←─────────│           │
//! └──────────────┘  UiEvent   └──────────────────────┘  result   └───────────┘
//! ```
//!
//! - All state lives in one owned `AppState`; the lock is never held across
//!   an `.await`.
//! - Auth, chat, and upload each allow one request in flight; a second call
//!   while one is pending fails with `AssistantError::Busy` and changes nothing.
//! - Controllers never print. Every visible change is a [`UiEvent`].
//!
//! # Example
//!
//! ```no_run
//! use assistant_client::{Assistant, ClientOptions, Credential};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut assistant = Assistant::connect(ClientOptions::from_env()?, Credential::new())?;
//! let mut events = assistant.take_event_receiver().expect("first take");
//!
//! if !assistant.restore_session().await {
//!     assistant.submit_email("a@corp.com").await?;
//! }
//! while let Ok(event) = events.try_recv() {
//!     log::info!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod chat;
mod upload;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::error::{AssistantError, Operation, Result};
use crate::monitor::ConnectionMonitor;
use crate::transport::{Credential, HttpTransport, Transport};
use crate::types::{
    AuthFlowState, ChatMessage, ChatStatistics, ClientOptions, Conversation, EventSink, Session,
    StatusKind, UiEvent, UploadResult,
};

pub use chat::ChatOutcome;

/// Everything the controllers mutate
#[derive(Debug, Default)]
struct AppState {
    session: Session,
    auth: AuthFlowState,
    conversation: Conversation,
    last_upload: Option<UploadResult>,
}

/// Marks an operation as in flight until dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, operation: Operation) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| AssistantError::Busy(operation))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for the assistant client
///
/// Generic over the transport so tests can script the backend; production
/// code uses [`HttpTransport`] via [`Assistant::connect`].
pub struct Assistant<T: Transport = HttpTransport> {
    api: ApiClient<T>,
    options: ClientOptions,
    state: Mutex<AppState>,
    /// Bumped on logout so replies to requests issued before it are dropped
    epoch: AtomicU64,
    auth_in_flight: AtomicBool,
    chat_in_flight: AtomicBool,
    upload_in_flight: AtomicBool,
    events: EventSink,
    event_rx: Option<mpsc::UnboundedReceiver<UiEvent>>,
}

impl Assistant<HttpTransport> {
    /// Create an assistant talking HTTP to `options.base_url`
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the options are invalid
    pub fn connect(options: ClientOptions, credential: Credential) -> Result<Self> {
        let api = ApiClient::http(options.clone(), &credential)?;
        Ok(Self::new(api, options))
    }
}

impl<T: Transport> Assistant<T> {
    /// Create an assistant over an existing API client
    pub fn new(api: ApiClient<T>, options: ClientOptions) -> Self {
        let (events, event_rx) = EventSink::channel();
        Self {
            api,
            options,
            state: Mutex::new(AppState::default()),
            epoch: AtomicU64::new(0),
            auth_in_flight: AtomicBool::new(false),
            chat_in_flight: AtomicBool::new(false),
            upload_in_flight: AtomicBool::new(false),
            events,
            event_rx: Some(event_rx),
        }
    }

    /// Take the render event receiver
    ///
    /// Returns `None` after the first call. Events are buffered until taken.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.event_rx.take()
    }

    /// Start probing the backend every `health_interval`
    ///
    /// The probe shares nothing with the assistant except the event channel.
    #[must_use]
    pub fn start_monitor(&self) -> ConnectionMonitor {
        ConnectionMonitor::spawn(
            self.api.clone(),
            self.options.health_interval,
            self.events.clone(),
        )
    }

    /// API client used by this assistant
    #[must_use]
    pub const fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Options this assistant was built with
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Snapshot of the session
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.lock().session.clone()
    }

    /// Snapshot of the login flow state
    #[must_use]
    pub fn auth_state(&self) -> AuthFlowState {
        self.state.lock().auth.clone()
    }

    /// Snapshot of the conversation
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().conversation.messages().to_vec()
    }

    /// Current chat statistics
    #[must_use]
    pub fn statistics(&self) -> ChatStatistics {
        self.state.lock().conversation.statistics()
    }

    /// Analysis of the most recent successful upload
    #[must_use]
    pub fn last_upload(&self) -> Option<UploadResult> {
        self.state.lock().last_upload.clone()
    }

    fn emit(&self, event: UiEvent) {
        self.events.emit(event);
    }

    fn auth_status(&self, message: impl Into<String>, kind: StatusKind) {
        self.emit(UiEvent::AuthStatus {
            message: message.into(),
            kind,
        });
    }

    fn upload_status(&self, message: impl Into<String>, kind: StatusKind) {
        self.emit(UiEvent::UploadStatus {
            message: message.into(),
            kind,
        });
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }
}
