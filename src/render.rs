//! Plain-text rendering of controller events

use crate::types::{
    ChatMessage, ChatStatistics, MessageMetadata, Sender, StatusKind, UiEvent, UploadResult,
};

/// Opening assistant message of an empty conversation
pub const GREETING: &str = "Hello! I'm your secure Intelligent Enterprise Assistant. I can help with HR policies, IT support, document processing, and organizational information.";

/// `Confidence: 92.0% | Category: hr | Time: 0.4s`, or nothing when the
/// backend reported no confidence
#[must_use]
pub fn format_metadata(metadata: &MessageMetadata) -> Option<String> {
    if metadata.confidence == 0.0 {
        return None;
    }
    Some(format!(
        "Confidence: {:.1}% | Category: {} | Time: {}s",
        metadata.confidence * 100.0,
        metadata.category,
        metadata.processing_time_seconds
    ))
}

/// One conversation entry, with its metadata line for assistant replies
#[must_use]
pub fn format_message(message: &ChatMessage) -> String {
    let prefix = match message.sender {
        Sender::User => "you",
        Sender::Assistant => "assistant",
    };
    let mut out = format!("[{prefix}] {}", message.text);
    if let Some(meta) = message.metadata.as_ref().and_then(format_metadata) {
        out.push_str("\n    ");
        out.push_str(&meta);
    }
    out
}

/// `Messages: 3 | Avg response: 250ms`
#[must_use]
pub fn format_statistics(statistics: &ChatStatistics) -> String {
    let average = statistics.average_response_ms().map_or_else(
        || "Response time: --".to_string(),
        |avg| format!("Avg response: {avg:.0}ms"),
    );
    format!("Messages: {} | {average}", statistics.message_count)
}

/// Analysis panel for an uploaded document
#[must_use]
pub fn format_upload(file_name: &str, result: &UploadResult) -> String {
    let keywords = if result.keywords.is_empty() {
        "-".to_string()
    } else {
        result.keywords.join(", ")
    };
    format!(
        "Analysis Results: {file_name}\n\
         Document Summary:\n  {}\n\
         Pages: {}  Words: {}\n\
         Key Topics: {keywords}\n\
         Extracted Text (Preview):\n  {}",
        result.summary, result.page_count, result.word_count, result.full_text_preview
    )
}

fn format_status(message: &str, kind: StatusKind) -> String {
    match kind {
        StatusKind::Info => format!("… {message}"),
        StatusKind::Success => format!("✓ {message}"),
        StatusKind::Error => format!("✗ {message}"),
    }
}

/// Text for an event, or `None` for events with no textual form
#[must_use]
pub fn render_event(event: &UiEvent) -> Option<String> {
    match event {
        UiEvent::ShowAuthView => {
            Some("Sign in: /email <address>, then /code <6-digit code>".to_string())
        }
        UiEvent::ShowMainView => Some(format!("[assistant] {GREETING}")),
        UiEvent::ShowCodeStep { email } => Some(format!("Enter the code sent to {email}")),
        UiEvent::ShowEmailStep | UiEvent::ClearAuthStatus | UiEvent::Pending(false) => None,
        UiEvent::AuthStatus { message, kind } | UiEvent::UploadStatus { message, kind } => {
            Some(format_status(message, *kind))
        }
        UiEvent::UserChanged(Some(user)) => Some(format!("Signed in as {user}")),
        UiEvent::UserChanged(None) => Some("Signed out".to_string()),
        UiEvent::MessageAppended(message) if message.sender == Sender::User => None,
        UiEvent::MessageAppended(message) => Some(format_message(message)),
        UiEvent::Pending(true) => Some("[assistant] ...".to_string()),
        UiEvent::StatisticsChanged(statistics) => Some(format_statistics(statistics)),
        UiEvent::ConversationCleared => Some(format!("[assistant] {GREETING}")),
        UiEvent::UploadCompleted { file_name, result } => Some(format_upload(file_name, result)),
        UiEvent::ConnectionChanged(status) => Some(format!("Connection: {status}")),
    }
}
