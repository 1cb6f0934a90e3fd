//! Chat controller

use std::time::{Duration, Instant};

use super::{Assistant, InFlight};
use crate::error::{AssistantError, Operation, Result};
use crate::transport::Transport;
use crate::types::{ChatMessage, UiEvent};

/// Reply shown when the backend could not be reached
pub const CHAT_RETRY_PROMPT: &str = "Sorry, I encountered an error. Please try again.";

/// What became of a `send`
#[derive(Debug)]
pub enum ChatOutcome {
    /// Message was empty or whitespace; nothing happened
    Ignored,
    /// Backend answered; the latency was added to the statistics
    Answered {
        /// Assistant message appended to the conversation
        reply: ChatMessage,
        /// Measured round-trip time
        elapsed: Duration,
    },
    /// Request failed; an explanatory assistant message was appended
    Failed {
        /// Assistant message appended to the conversation
        reply: ChatMessage,
        /// Underlying failure
        error: AssistantError,
    },
    /// The user signed out before the answer arrived; it was dropped
    Discarded,
}

impl<T: Transport> Assistant<T> {
    /// Send a chat message
    ///
    /// The user message is appended and counted before the request goes out.
    /// Backend and transport failures become an assistant message and never
    /// add to the response-time total.
    ///
    /// # Errors
    /// Only `Busy`, when another chat request is still pending
    pub async fn send(&self, message: &str) -> Result<ChatOutcome> {
        let text = message.trim();
        if text.is_empty() {
            return Ok(ChatOutcome::Ignored);
        }
        let _in_flight = InFlight::acquire(&self.chat_in_flight, Operation::Chat)?;
        let epoch = self.current_epoch();

        let user_message = ChatMessage::user(text);
        let statistics = {
            let mut state = self.state.lock();
            state.conversation.push(user_message.clone());
            state.conversation.statistics()
        };
        self.emit(UiEvent::MessageAppended(user_message));
        self.emit(UiEvent::StatisticsChanged(statistics));
        self.emit(UiEvent::Pending(true));

        let started = Instant::now();
        let result = self.api.chat(text).await;
        let elapsed = started.elapsed();
        self.emit(UiEvent::Pending(false));

        let mut state = self.state.lock();
        if self.current_epoch() != epoch {
            log::debug!("Dropping chat reply that arrived after sign-out");
            return Ok(ChatOutcome::Discarded);
        }

        match result {
            Ok(payload) => {
                let reply = ChatMessage::assistant(payload.response.clone(), payload.metadata());
                let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
                state.conversation.push(reply.clone());
                state.conversation.record_response_time(elapsed_ms);
                let statistics = state.conversation.statistics();
                drop(state);
                log::debug!("Chat answered in {elapsed_ms}ms");
                self.emit(UiEvent::MessageAppended(reply.clone()));
                self.emit(UiEvent::StatisticsChanged(statistics));
                Ok(ChatOutcome::Answered { reply, elapsed })
            }
            Err(error) => {
                let text = match &error {
                    AssistantError::Application(msg) => format!("Error: {msg}"),
                    _ => CHAT_RETRY_PROMPT.to_string(),
                };
                log::error!("Chat request failed: {error}");
                let reply = ChatMessage::assistant(text, None);
                state.conversation.push(reply.clone());
                drop(state);
                self.emit(UiEvent::MessageAppended(reply.clone()));
                Ok(ChatOutcome::Failed { reply, error })
            }
        }
    }

    /// Clear the conversation and reset statistics
    pub fn clear_chat(&self) {
        let statistics = {
            let mut state = self.state.lock();
            state.conversation.clear();
            state.conversation.statistics()
        };
        self.emit(UiEvent::ConversationCleared);
        self.emit(UiEvent::StatisticsChanged(statistics));
    }
}
