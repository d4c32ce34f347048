//! Untyped event as delivered by the run stream

use super::kind::RunEventKind;
use super::RunEvent;
use crate::error::{MalformedEvent, TransportError};
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Stream of raw events handed out by a [`crate::RunTransport`].
///
/// Dropping the stream releases the underlying connection.
pub type RawEventStream = BoxStream<'static, Result<RawEvent, TransportError>>;

/// An `(event type, event data)` pair as received from the remote run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Wire event type, e.g. `thread.message.delta`
    pub event_type: String,

    /// Event payload
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawEvent {
    /// Create a raw event
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Classify the event type
    pub fn kind(&self) -> RunEventKind {
        RunEventKind::from_event_type(&self.event_type)
    }

    /// Decode into a typed [`RunEvent`]
    ///
    /// Unknown event types decode to [`RunEvent::Unknown`] without looking at
    /// the payload.
    pub fn decode(&self) -> Result<RunEvent, MalformedEvent> {
        Ok(match self.kind() {
            RunEventKind::StepDelta => RunEvent::StepDelta(self.payload()?),
            RunEventKind::RunStep => RunEvent::RunStep(self.payload()?),
            RunEventKind::MessageDelta => RunEvent::MessageDelta(self.payload()?),
            RunEventKind::Message => RunEvent::Message(self.payload()?),
            RunEventKind::MessageCompleted => RunEvent::MessageCompleted,
            RunEventKind::RunFailed => RunEvent::RunFailed(self.payload()?),
            RunEventKind::Done => RunEvent::Done,
            RunEventKind::Unknown => RunEvent::Unknown(self.event_type.clone()),
        })
    }

    fn payload<T: DeserializeOwned>(&self) -> Result<T, MalformedEvent> {
        T::deserialize(&self.data).map_err(|source| MalformedEvent::Payload {
            event_type: self.event_type.clone(),
            source,
        })
    }

    /// Serialize to a JSON line (for recording a stream)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON line (for replaying a recorded stream)
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
