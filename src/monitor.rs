//! Periodic backend liveness probe
//!
//! Each tick is independent: any 2xx from the health endpoint means Online,
//! anything else (including transport errors) means Offline. Probe results
//! never touch the session or the conversation.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ApiClient;
use crate::transport::Transport;
use crate::types::{ConnectionStatus, EventSink, UiEvent};

/// Probe the backend once
pub async fn probe<T: Transport>(api: &ApiClient<T>) -> ConnectionStatus {
    match api.health().await {
        Ok(()) => ConnectionStatus::Online,
        Err(e) => {
            log::debug!("Health probe failed: {e}");
            ConnectionStatus::Offline
        }
    }
}

/// Background connection monitor
///
/// The probe task is aborted on `shutdown` or drop.
pub struct ConnectionMonitor {
    status: watch::Receiver<ConnectionStatus>,
    handle: Option<JoinHandle<()>>,
}

impl ConnectionMonitor {
    /// Spawn the probe loop; the first probe runs immediately
    #[must_use]
    pub fn spawn<T: Transport>(api: ApiClient<T>, interval: Duration, events: EventSink) -> Self {
        let (status_tx, status) = watch::channel(ConnectionStatus::Unknown);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let next = probe(&api).await;
                let changed = status_tx.send_if_modified(|current| {
                    let changed = *current != next;
                    *current = next;
                    changed
                });
                if changed {
                    log::info!("Backend is {next}");
                    events.emit(UiEvent::ConnectionChanged(next));
                }
            }
        });

        Self {
            status,
            handle: Some(handle),
        }
    }

    /// Latest probe result
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }

    /// Watch for status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }

    /// Whether the probe loop is still scheduled
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop probing
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::debug!("Connection monitor stopped");
        }
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
