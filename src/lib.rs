//! Runstream
//!
//! This crate turns the live event stream of a remote conversational-agent run
//! into an ordered, incrementally updated list of chat messages that a caller
//! can render after every event.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use futures_util::StreamExt;
//! use runstream::{ConversationConfig, ConversationDriver};
//!
//! let config = ConversationConfig::from_json_str(r#"{"thread_id":"t1","agent_id":"a1"}"#)?;
//! let driver = ConversationDriver::from_config(Arc::new(my_transport), &config);
//!
//! let mut turn = driver.stream_user_message("What's the weather in Paris?", history);
//! while let Some(snapshot) = turn.next().await {
//!     render(&snapshot?.messages);
//! }
//! ```
//!
//! ## Core Principles
//!
//! 1. **One message per tool call**: tool-call bubbles are keyed by `tool-{call_id}`
//! 2. **No lost fragments**: deltas that arrive before their call id are buffered by index
//! 3. **Append-only while pending**: content only grows until the bubble is marked done
//! 4. **Per-turn state**: every turn starts from fresh accumulation state

use serde::{Deserialize, Serialize};

pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod registry;
pub mod streaming;
pub mod timeline;

pub use config::{ConversationConfig, ToolLabelConfig};
pub use driver::{ConversationDriver, RunTransport, SnapshotStream, Turn, TurnPhase};
pub use error::{ConfigError, ConversationError, MalformedEvent, TransportError};
pub use events::{RawEvent, RawEventStream, RunEvent};
pub use registry::{ToolLabel, ToolRegistry};
pub use streaming::PartialCallAccumulator;
pub use timeline::Timeline;

/// Prefix shared by every tool-call message id.
pub const TOOL_ID_PREFIX: &str = "tool-";

/// Build the message id used for the bubble of a tool call.
pub fn tool_message_id(call_id: &str) -> String {
    format!("{TOOL_ID_PREFIX}{call_id}")
}

// ============================================================================
// Core Message Types
// ============================================================================

/// A single renderable chat message.
///
/// History records handed in by the caller deserialize 1:1 into this type,
/// and snapshots serialize back into the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced the message
    pub role: MessageRole,
    /// Text content; for tool calls, the accumulated arguments
    #[serde(default)]
    pub content: String,
    /// Title, status and id
    #[serde(default)]
    pub metadata: MessageMetadata,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
            metadata: MessageMetadata::default(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
            metadata: MessageMetadata::default(),
        }
    }

    /// Create a pending tool-call bubble keyed by `tool-{call_id}`
    pub fn tool_call(
        call_id: &str,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            metadata: MessageMetadata {
                title: Some(title.into()),
                status: Some(MessageStatus::Pending),
                id: Some(tool_message_id(call_id)),
            },
        }
    }

    /// Set the upstream message id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.id = Some(id.into());
        self
    }

    /// Message id, if any
    pub fn id(&self) -> Option<&str> {
        self.metadata.id.as_deref()
    }

    /// Whether this message is a tool-call bubble
    pub fn is_tool_call(&self) -> bool {
        self.id().is_some_and(|id| id.starts_with(TOOL_ID_PREFIX))
    }

    /// Whether the message is still being streamed
    pub fn is_pending(&self) -> bool {
        self.metadata.status == Some(MessageStatus::Pending)
    }

    /// Whether the message has been frozen
    pub fn is_done(&self) -> bool {
        self.metadata.status == Some(MessageStatus::Done)
    }
}

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input
    User,
    /// Assistant text or tool-call bubble
    Assistant,
}

impl MessageRole {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Streaming status of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Still receiving deltas
    Pending,
    /// Frozen
    Done,
}

/// Optional rendering metadata attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// User-facing title (tool label for tool-call bubbles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Streaming status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// `tool-{call_id}` for tool calls, upstream message id for text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// The ordered message list handed to the caller after each state change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Messages in timeline order
    pub messages: Vec<ChatMessage>,
    /// Replacement value for the caller's input box; always empty once the
    /// utterance has been accepted
    pub input: String,
}

impl Snapshot {
    /// Snapshot of the given messages with a cleared input box
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            input: String::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_creation() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.metadata, MessageMetadata::default());

        let msg = ChatMessage::assistant("Hi there!").with_id("msg_1");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.id(), Some("msg_1"));
        assert!(!msg.is_tool_call());
    }

    #[test]
    fn test_tool_call_message() {
        let msg = ChatMessage::tool_call("call_9", "searching bing", "{\"q\":");
        assert_eq!(msg.id(), Some("tool-call_9"));
        assert!(msg.is_tool_call());
        assert!(msg.is_pending());
        assert!(!msg.is_done());
        assert_eq!(msg.metadata.title.as_deref(), Some("searching bing"));
    }

    #[test]
    fn test_external_shape() {
        let msg = ChatMessage::tool_call("abc", "calling fetch_weather", "{}");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "{}");
        assert_eq!(json["metadata"]["status"], "pending");
        assert_eq!(json["metadata"]["id"], "tool-abc");
        assert_eq!(json["metadata"]["title"], "calling fetch_weather");

        // Absent metadata fields are omitted, not null
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["metadata"].as_object().unwrap().len(), 0);
    }

    #[test]
    fn test_history_record_without_metadata() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"earlier answer"}"#).unwrap();
        assert_eq!(msg, ChatMessage::assistant("earlier answer"));
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_snapshot_input_is_cleared() {
        let snapshot = Snapshot::new(vec![ChatMessage::user("q")]);
        assert_eq!(snapshot.input, "");
        assert_eq!(snapshot.messages.len(), 1);
    }
}
