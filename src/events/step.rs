//! Run step payloads

use super::tool_call::ToolCallDelta;
use serde::{Deserialize, Deserializer};

/// Kind of a run step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum StepKind {
    ToolCalls,
    MessageCreation,
    Other(String),
}

impl From<String> for StepKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tool_calls" => Self::ToolCalls,
            "message_creation" => Self::MessageCreation,
            _ => Self::Other(value),
        }
    }
}

impl Default for StepKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Status of a run step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum StepStatus {
    InProgress,
    Completed,
    /// failed, cancelled, expired, ...
    Other(String),
}

impl From<String> for StepStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

/// Details shared by run steps and run step deltas
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StepDetails {
    #[serde(rename = "type", default)]
    pub kind: StepKind,
    #[serde(default, deserialize_with = "tool_calls_lenient")]
    pub tool_calls: Vec<ToolCallDelta>,
    #[serde(default)]
    pub message_creation: Option<MessageCreation>,
}

/// Decode tool calls one entry at a time so a malformed entry does not take
/// its well-formed siblings down with it.
fn tool_calls_lenient<'de, D>(deserializer: D) -> Result<Vec<ToolCallDelta>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match ToolCallDelta::deserialize(entry) {
            Ok(call) => Some(call),
            Err(err) => {
                tracing::warn!(position, error = %err, "skipping malformed tool call entry");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageCreation {
    #[serde(default)]
    pub message_id: Option<String>,
}

/// `run_step` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub status: StepStatus,
    #[serde(default)]
    pub step_details: Option<StepDetails>,
}

impl RunStep {
    /// Tool calls listed in the step details
    pub fn tool_calls(&self) -> &[ToolCallDelta] {
        self.step_details
            .as_ref()
            .map(|details| details.tool_calls.as_slice())
            .unwrap_or(&[])
    }

    /// Id of the message a message-creation step is producing
    pub fn created_message_id(&self) -> Option<&str> {
        self.step_details
            .as_ref()?
            .message_creation
            .as_ref()?
            .message_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

/// `thread.run.step.delta` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StepDelta {
    #[serde(default)]
    pub delta: Option<StepDeltaBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StepDeltaBody {
    #[serde(default)]
    pub step_details: Option<StepDetails>,
}

impl StepDelta {
    /// Tool-call fragments, when this delta belongs to a tool-calls step
    pub fn tool_calls(&self) -> Option<&[ToolCallDelta]> {
        let details = self.delta.as_ref()?.step_details.as_ref()?;
        (details.kind == StepKind::ToolCalls).then_some(details.tool_calls.as_slice())
    }
}
