//! Run-stream event model
//!
//! The remote run emits `(event type, event data)` pairs. [`RawEvent`] holds
//! one such pair untouched; [`RawEvent::decode`] turns it into a [`RunEvent`],
//! a closed set of the event kinds the driver reacts to plus an explicit
//! [`RunEvent::Unknown`] arm for everything else.
//!
//! ## Usage
//!
//! ```rust
//! use runstream::events::{RawEvent, RunEvent};
//!
//! let raw = RawEvent::new(
//!     "thread.message.delta",
//!     serde_json::json!({"id": "msg_1", "delta": {"content": [{"text": {"value": "Hel"}}]}}),
//! );
//! match raw.decode().unwrap() {
//!     RunEvent::MessageDelta(delta) => assert_eq!(delta.text(), "Hel"),
//!     other => panic!("unexpected event: {other:?}"),
//! }
//! ```

mod kind;
mod message;
mod raw;
mod step;
mod tool_call;

pub use kind::RunEventKind;
pub use message::{ContentDelta, MessageDelta, MessageDeltaBody, RunFailure, TextDelta, ThreadMessage};
pub use raw::{RawEvent, RawEventStream};
pub use step::{MessageCreation, RunStep, StepDelta, StepDeltaBody, StepDetails, StepKind, StepStatus};
pub use tool_call::{extract_search_query, BingGroundingDetails, FunctionDelta, ToolCallDelta};

/// A decoded run-stream event
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Tool-call fragments of an in-flight step
    StepDelta(StepDelta),
    /// Step lifecycle transition
    RunStep(RunStep),
    /// Assistant text fragment
    MessageDelta(MessageDelta),
    /// Full message object
    Message(ThreadMessage),
    /// Assistant reply finished; ends the stream
    MessageCompleted,
    /// The remote run failed
    RunFailed(RunFailure),
    /// End of the event stream
    Done,
    /// Unrecognized event type, kept for logging
    Unknown(String),
}

impl RunEvent {
    /// Kind of this event
    pub fn kind(&self) -> RunEventKind {
        match self {
            Self::StepDelta(_) => RunEventKind::StepDelta,
            Self::RunStep(_) => RunEventKind::RunStep,
            Self::MessageDelta(_) => RunEventKind::MessageDelta,
            Self::Message(_) => RunEventKind::Message,
            Self::MessageCompleted => RunEventKind::MessageCompleted,
            Self::RunFailed(_) => RunEventKind::RunFailed,
            Self::Done => RunEventKind::Done,
            Self::Unknown(_) => RunEventKind::Unknown,
        }
    }
}
