//! Message payloads: text deltas, message objects and run failures

use serde::Deserialize;

/// `thread.message.delta` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDelta {
    /// Upstream message id
    pub id: String,
    #[serde(default)]
    pub delta: MessageDeltaBody,
}

impl MessageDelta {
    /// Concatenated text of every text chunk in the delta
    pub fn text(&self) -> String {
        self.delta
            .content
            .iter()
            .filter_map(|chunk| chunk.text.as_ref())
            .filter_map(|text| text.value.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageDeltaBody {
    #[serde(default)]
    pub content: Vec<ContentDelta>,
}

/// One content chunk; non-text chunks carry no `text`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentDelta {
    #[serde(default)]
    pub text: Option<TextDelta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextDelta {
    #[serde(default)]
    pub value: Option<String>,
}

/// `thread.message` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ThreadMessage {
    /// Whether this is a finished assistant message
    pub fn is_completed_assistant(&self) -> bool {
        self.role == "assistant" && self.status.as_deref() == Some("completed")
    }
}

/// `thread.run.failed` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunFailure {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub last_error: Option<serde_json::Value>,
}
