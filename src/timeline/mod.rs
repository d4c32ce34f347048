//! Ordered, mutable list of chat messages for one turn.

use crate::{tool_message_id, ChatMessage, MessageRole, MessageStatus};

/// The renderable message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    messages: Vec<ChatMessage>,
}

/// Outcome of projecting a tool call onto the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolUpsert {
    /// A new bubble was appended
    Created,
    /// An existing pending bubble was rewritten
    Updated,
    /// The bubble is already done and was left untouched
    Frozen,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from prior history, preserving content and metadata
    pub fn from_history(history: impl IntoIterator<Item = ChatMessage>) -> Self {
        Self {
            messages: history.into_iter().collect(),
        }
    }

    /// Append a message
    pub fn append(&mut self, message: ChatMessage) -> &mut Self {
        self.messages.push(message);
        self
    }

    /// Most recent message with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.id() == Some(id))
    }

    /// Mutable access to the most recent message with the given id
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().rev().find(|m| m.id() == Some(id))
    }

    /// Last message
    pub fn tail(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// All messages in order
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the timeline is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Take the messages out of the timeline
    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }

    /// Start a new assistant text bubble, tagged with the upstream id if known
    pub fn start_assistant_message(&mut self, message_id: Option<&str>) {
        let mut message = ChatMessage::assistant("");
        message.metadata.id = message_id.map(str::to_string);
        self.messages.push(message);
    }

    /// Apply an assistant text delta.
    ///
    /// The chunk goes to, in order of preference:
    /// 1. the assistant message whose id matches `message_id`;
    /// 2. the tail, if it is an assistant message that is not a tool-call
    ///    bubble (an untagged tail adopts `message_id`);
    /// 3. a new assistant message.
    ///
    /// Returns `false` only when the chunk was empty and nothing changed.
    pub fn append_text_delta(&mut self, message_id: &str, chunk: &str) -> bool {
        if let Some(message) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == MessageRole::Assistant && m.id() == Some(message_id))
        {
            message.content.push_str(chunk);
            return !chunk.is_empty();
        }

        if let Some(tail) = self
            .messages
            .last_mut()
            .filter(|m| m.role == MessageRole::Assistant && !m.is_tool_call())
        {
            tail.content.push_str(chunk);
            if tail.metadata.id.is_none() && !message_id.is_empty() {
                tail.metadata.id = Some(message_id.to_string());
                return true;
            }
            return !chunk.is_empty();
        }

        if chunk.is_empty() {
            return false;
        }
        let mut message = ChatMessage::assistant(chunk);
        if !message_id.is_empty() {
            message.metadata.id = Some(message_id.to_string());
        }
        self.messages.push(message);
        true
    }

    /// Create or rewrite the pending bubble for a tool call.
    ///
    /// A bubble that is already done keeps its content and title.
    pub fn upsert_tool_message(&mut self, call_id: &str, title: String, content: &str) -> ToolUpsert {
        let id = tool_message_id(call_id);
        match self.find_by_id_mut(&id) {
            Some(message) if message.is_done() => ToolUpsert::Frozen,
            Some(message) => {
                message.content.clear();
                message.content.push_str(content);
                message.metadata.title = Some(title);
                ToolUpsert::Updated
            }
            None => {
                self.messages.push(ChatMessage::tool_call(call_id, title, content));
                ToolUpsert::Created
            }
        }
    }

    /// Flip every pending message to done. Returns how many changed.
    pub fn finalize_pending(&mut self) -> usize {
        let mut flipped = 0;
        for message in self.messages.iter_mut().filter(|m| m.is_pending()) {
            message.metadata.status = Some(MessageStatus::Done);
            flipped += 1;
        }
        flipped
    }

    /// Ids of the tool-call bubbles still pending
    pub fn pending_tool_ids(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.is_tool_call() && m.is_pending())
            .filter_map(ChatMessage::id)
            .collect()
    }
}

#[cfg(test)]
mod tests;
