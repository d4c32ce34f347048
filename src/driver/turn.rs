//! Per-turn reconciliation state machine.

use crate::events::{RunEvent, RunStep, StepKind, StepStatus, ToolCallDelta};
use crate::registry::ToolRegistry;
use crate::streaming::PartialCallAccumulator;
use crate::timeline::Timeline;
use crate::{ChatMessage, Snapshot};
use std::sync::Arc;

/// Lifecycle of one turn. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Building the timeline from history
    Seeding,
    /// Sending the user utterance
    Posting,
    /// Consuming run events
    Streaming,
    /// Every bubble is done
    Finalized,
    /// A transport failure ended the turn
    Aborted,
}

impl TurnPhase {
    /// Whether the turn is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::Aborted)
    }

    fn can_advance_to(&self, next: TurnPhase) -> bool {
        match (self, next) {
            (Self::Seeding, Self::Posting) => true,
            (Self::Posting, Self::Streaming) => true,
            (Self::Streaming, Self::Finalized) => true,
            (current, Self::Aborted) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// What applying an event did to the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Nothing observable happened
    Ignored,
    /// The caller should get a fresh snapshot
    Changed,
    /// The stream is over; the caller gets a final snapshot
    Finished,
}

/// Everything one turn owns: timeline, accumulation buffers and phase.
///
/// A new turn always starts from a new `Turn`; nothing here is shared
/// except the read-only registry.
#[derive(Debug)]
pub struct Turn {
    registry: Arc<ToolRegistry>,
    timeline: Timeline,
    calls: PartialCallAccumulator,
    phase: TurnPhase,
}

impl Turn {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            timeline: Timeline::new(),
            calls: PartialCallAccumulator::new(),
            phase: TurnPhase::Seeding,
        }
    }

    /// Load history, append the user utterance and move on to posting.
    pub fn seed(
        &mut self,
        history: impl IntoIterator<Item = ChatMessage>,
        user_message: &str,
    ) -> Snapshot {
        self.timeline = Timeline::from_history(history);
        self.timeline.append(ChatMessage::user(user_message));
        self.transition(TurnPhase::Posting);
        self.snapshot()
    }

    /// The utterance was accepted; start consuming events
    pub fn begin_streaming(&mut self) {
        self.transition(TurnPhase::Streaming);
    }

    /// A transport failure ended the turn.
    ///
    /// Bubbles left pending by a broken stream are frozen; before streaming
    /// the timeline is kept as is.
    pub fn abort(&mut self) {
        if self.phase == TurnPhase::Streaming {
            self.finalize();
        }
        self.transition(TurnPhase::Aborted);
    }

    /// The stream ended: freeze all bubbles and close the turn
    pub fn finish(&mut self) {
        self.finalize();
        self.transition(TurnPhase::Finalized);
    }

    /// Apply one decoded event.
    pub fn apply(&mut self, event: RunEvent) -> Applied {
        if self.phase != TurnPhase::Streaming {
            tracing::debug!(phase = ?self.phase, kind = %event.kind(), "event outside of streaming phase");
            return Applied::Ignored;
        }

        match event {
            RunEvent::StepDelta(delta) => match delta.tool_calls() {
                Some(calls) => {
                    self.upsert_tool_calls(calls);
                    Applied::Changed
                }
                None => Applied::Ignored,
            },
            RunEvent::RunStep(step) => self.apply_run_step(&step),
            RunEvent::MessageDelta(delta) => {
                if self.timeline.append_text_delta(&delta.id, &delta.text()) {
                    Applied::Changed
                } else {
                    Applied::Ignored
                }
            }
            RunEvent::Message(message) if message.is_completed_assistant() => {
                self.finalize();
                Applied::Changed
            }
            RunEvent::Message(_) => Applied::Ignored,
            RunEvent::MessageCompleted | RunEvent::Done => {
                self.finish();
                Applied::Finished
            }
            RunEvent::RunFailed(failure) => {
                tracing::error!(
                    run_id = ?failure.id,
                    last_error = ?failure.last_error,
                    "agent run failed"
                );
                Applied::Ignored
            }
            RunEvent::Unknown(event_type) => {
                tracing::debug!(%event_type, "ignoring unhandled event");
                Applied::Ignored
            }
        }
    }

    fn apply_run_step(&mut self, step: &RunStep) -> Applied {
        match (&step.kind, &step.status) {
            (StepKind::ToolCalls, StepStatus::InProgress) => {
                self.upsert_tool_calls(step.tool_calls());
                Applied::Changed
            }
            (StepKind::ToolCalls, StepStatus::Completed) => {
                self.finalize();
                Applied::Changed
            }
            (StepKind::MessageCreation, StepStatus::InProgress) => {
                let message_id = step.created_message_id();
                let seen = message_id.is_some_and(|id| self.timeline.find_by_id(id).is_some());
                if !seen {
                    self.timeline.start_assistant_message(message_id);
                }
                Applied::Changed
            }
            (StepKind::MessageCreation, StepStatus::Completed) => Applied::Changed,
            (kind, status) => {
                tracing::debug!(?kind, ?status, "ignoring run step");
                Applied::Ignored
            }
        }
    }

    fn upsert_tool_calls(&mut self, calls: &[ToolCallDelta]) {
        for call in calls {
            if let Err(err) = self
                .calls
                .upsert_tool_call(call, &mut self.timeline, &self.registry)
            {
                tracing::warn!(error = %err, "skipping malformed tool call");
            }
        }
    }

    fn finalize(&mut self) {
        let flipped = self.timeline.finalize_pending();
        self.calls.reset();
        tracing::debug!(flipped, "finalized pending messages");
    }

    fn transition(&mut self, next: TurnPhase) {
        if self.phase.can_advance_to(next) {
            tracing::debug!(from = ?self.phase, to = ?next, "turn phase");
            self.phase = next;
        } else {
            tracing::debug!(from = ?self.phase, to = ?next, "rejected turn phase transition");
        }
    }

    /// Current phase
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The live timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Tool-call accumulation state
    pub fn accumulator(&self) -> &PartialCallAccumulator {
        &self.calls
    }

    /// Copy of the timeline for the caller
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.timeline.all().to_vec())
    }
}
