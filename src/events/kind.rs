//! Run event kind discriminator

use serde::{Deserialize, Serialize};

/// The run-stream event types this crate understands.
///
/// Everything else maps to [`RunEventKind::Unknown`] and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEventKind {
    /// `thread.run.step.delta`: incremental tool-call fragments
    StepDelta,
    /// `run_step`: step lifecycle transition
    RunStep,
    /// `thread.message.delta`: incremental assistant text
    MessageDelta,
    /// `thread.message`: full message object
    Message,
    /// `thread.message.completed`: end of the assistant reply
    MessageCompleted,
    /// `thread.run.failed`: the remote run failed
    RunFailed,
    /// `done`: end of the event stream
    Done,
    /// Anything else
    Unknown,
}

impl RunEventKind {
    /// Classify a wire event type
    pub fn from_event_type(event_type: &str) -> Self {
        match event_type {
            "thread.run.step.delta" => Self::StepDelta,
            "run_step" => Self::RunStep,
            "thread.message.delta" => Self::MessageDelta,
            "thread.message" => Self::Message,
            "thread.message.completed" => Self::MessageCompleted,
            "thread.run.failed" => Self::RunFailed,
            "done" => Self::Done,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the event type
    pub fn as_str(&self) -> &str {
        match self {
            Self::StepDelta => "thread.run.step.delta",
            Self::RunStep => "run_step",
            Self::MessageDelta => "thread.message.delta",
            Self::Message => "thread.message",
            Self::MessageCompleted => "thread.message.completed",
            Self::RunFailed => "thread.run.failed",
            Self::Done => "done",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this event ends the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::MessageCompleted | Self::Done)
    }
}

impl std::fmt::Display for RunEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
