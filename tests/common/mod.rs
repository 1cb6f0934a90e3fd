//! Shared test helpers: a scripted in-memory backend

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;

use assistant_client::{
    ApiClient, ApiRequest, Assistant, AssistantError, ClientOptions, Endpoint, RawResponse,
    Transport, UiEvent,
};

/// One scripted answer
#[derive(Debug, Clone)]
pub struct Reply {
    outcome: Result<RawResponse, String>,
    delay: Duration,
}

impl Reply {
    /// 200 with a JSON body
    pub fn ok(body: Value) -> Self {
        Self::status(200, body)
    }

    /// `{"status": "success"}`
    pub fn success() -> Self {
        Self::ok(json!({"status": "success"}))
    }

    /// 200 with `{"status": "error", "message": msg}`
    pub fn rejected(msg: &str) -> Self {
        Self::ok(json!({"status": "error", "message": msg}))
    }

    /// Any status with a JSON body
    pub fn status(status: u16, body: Value) -> Self {
        Self {
            outcome: Ok(RawResponse {
                status,
                body: serde_json::to_vec(&body).expect("serializable body"),
            }),
            delay: Duration::ZERO,
        }
    }

    /// Transport-level failure (connection refused)
    pub fn offline() -> Self {
        Self {
            outcome: Err("connection refused".to_string()),
            delay: Duration::ZERO,
        }
    }

    /// Delay the answer
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct Script {
    queued: HashMap<Endpoint, VecDeque<Reply>>,
    fallback: HashMap<Endpoint, Reply>,
    requests: Vec<ApiRequest>,
}

/// In-memory backend that records every request
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next request to `endpoint` with `reply`
    pub fn push(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.script
            .lock()
            .queued
            .entry(endpoint)
            .or_default()
            .push_back(reply);
        self
    }

    /// Answer `endpoint` with `reply` whenever nothing is queued
    pub fn always(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.script.lock().fallback.insert(endpoint, reply);
        self
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().requests.clone()
    }

    /// Number of requests seen for `endpoint`
    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.script
            .lock()
            .requests
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }

    /// Total number of requests seen
    pub fn total(&self) -> usize {
        self.script.lock().requests.len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> assistant_client::Result<RawResponse> {
        let endpoint = request.endpoint;
        let reply = {
            let mut script = self.script.lock();
            script.requests.push(request);
            let queued = script.queued.get_mut(&endpoint).and_then(VecDeque::pop_front);
            queued.or_else(|| script.fallback.get(&endpoint).cloned())
        };
        let Some(reply) = reply else {
            return Err(AssistantError::request(format!(
                "no scripted reply for {endpoint:?}"
            )));
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome.map_err(AssistantError::request)
    }
}

/// Options with no login pause
pub fn test_options() -> ClientOptions {
    ClientOptions::builder()
        .base_url("http://assistant.test/api")
        .auth_transition_delay(Duration::ZERO)
        .health_interval(Duration::from_millis(10))
        .build()
        .expect("valid test options")
}

/// Assistant over `mock`, plus its event receiver
pub fn assistant(
    mock: &MockTransport,
) -> (
    Assistant<MockTransport>,
    mpsc::UnboundedReceiver<UiEvent>,
) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut assistant = Assistant::new(ApiClient::new(mock.clone()), test_options());
    let events = assistant
        .take_event_receiver()
        .expect("receiver is available once");
    (assistant, events)
}

/// Everything emitted so far
pub fn drain(events: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// `{"status": "success", "user": {...}}`
pub fn user_info(name: &str, department: &str) -> Reply {
    Reply::ok(json!({
        "status": "success",
        "user": {"name": name, "department": department}
    }))
}

/// Drive the login flow to an authenticated session
pub async fn sign_in(assistant: &Assistant<MockTransport>, mock: &MockTransport) {
    mock.push(Endpoint::InitiateAuth, Reply::success())
        .push(Endpoint::VerifyCode, Reply::success())
        .push(Endpoint::UserInfo, user_info("Ada Lovelace", "IT"));
    assistant
        .submit_email("a@corp.com")
        .await
        .expect("email accepted");
    assistant.submit_code("123456").await.expect("code accepted");
}
