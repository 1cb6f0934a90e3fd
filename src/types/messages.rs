//! Chat message and conversation types
//!
//! The conversation is append-only: messages are never edited after they are
//! pushed, and the whole sequence is cleared at once on logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Messages
// ============================================================================

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The signed-in user
    User,
    /// The backend assistant
    Assistant,
}

/// Classification details the backend attaches to an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
    /// Topic category (hr, it, ...)
    pub category: String,
    /// Server-side processing time in seconds
    pub processing_time_seconds: f64,
}

/// A single entry in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id
    pub id: Uuid,
    /// Message text
    pub text: String,
    /// Author
    pub sender: Sender,
    /// Answer metadata (assistant replies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    /// When the message entered the conversation
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User, None)
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>, metadata: Option<MessageMetadata>) -> Self {
        Self::new(text.into(), Sender::Assistant, metadata)
    }

    fn new(text: String, sender: Sender, metadata: Option<MessageMetadata>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            sender,
            metadata,
            sent_at: Utc::now(),
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Running chat statistics
///
/// `message_count` counts user messages; `total_response_time_ms` sums the
/// latency of successful answers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStatistics {
    /// Number of user messages sent
    pub message_count: u64,
    /// Sum of measured round-trip times of successful answers
    pub total_response_time_ms: u64,
}

impl ChatStatistics {
    /// Average response time, undefined before the first message
    #[must_use]
    pub fn average_response_ms(&self) -> Option<f64> {
        if self.message_count == 0 {
            None
        } else {
            Some(self.total_response_time_ms as f64 / self.message_count as f64)
        }
    }
}

// ============================================================================
// Conversation
// ============================================================================

/// Ordered messages plus their statistics
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    statistics: ChatStatistics,
}

impl Conversation {
    /// Append a message; user messages bump the message count
    pub fn push(&mut self, message: ChatMessage) {
        if message.sender == Sender::User {
            self.statistics.message_count += 1;
        }
        self.messages.push(message);
    }

    /// Record the latency of a successful answer
    pub fn record_response_time(&mut self, elapsed_ms: u64) {
        self.statistics.total_response_time_ms += elapsed_ms;
    }

    /// All messages in order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current statistics
    #[must_use]
    pub const fn statistics(&self) -> ChatStatistics {
        self.statistics
    }

    /// Drop every message and reset statistics together
    pub fn clear(&mut self) {
        self.messages.clear();
        self.statistics = ChatStatistics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_messages_are_counted() {
        let mut conversation = Conversation::default();
        conversation.push(ChatMessage::user("hello"));
        conversation.push(ChatMessage::assistant("hi", None));
        assert_eq!(conversation.statistics().message_count, 1);
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn average_is_undefined_without_messages() {
        assert_eq!(ChatStatistics::default().average_response_ms(), None);

        let stats = ChatStatistics {
            message_count: 4,
            total_response_time_ms: 1000,
        };
        assert_eq!(stats.average_response_ms(), Some(250.0));
    }

    #[test]
    fn clear_resets_messages_and_statistics() {
        let mut conversation = Conversation::default();
        conversation.push(ChatMessage::user("hello"));
        conversation.record_response_time(120);
        conversation.clear();
        assert!(conversation.messages().is_empty());
        assert_eq!(conversation.statistics(), ChatStatistics::default());
    }
}
