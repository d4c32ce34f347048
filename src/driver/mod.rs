//! Conversation reconciliation driver.
//!
//! [`ConversationDriver::stream_user_message`] seeds the timeline, posts the
//! utterance to the remote thread, then opens the run stream and yields a
//! [`Snapshot`] after every event that changes the timeline. The returned
//! stream pulls exactly one upstream event per step; dropping it early drops
//! the upstream handle with it.

mod turn;

pub use turn::{Applied, Turn, TurnPhase};

use crate::config::ConversationConfig;
use crate::error::{ConversationError, TransportError};
use crate::events::RawEventStream;
use crate::registry::ToolRegistry;
use crate::{ChatMessage, MessageRole, Snapshot};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;

/// Snapshots of one turn, ending with an error on transport failure.
pub type SnapshotStream = BoxStream<'static, Result<Snapshot, ConversationError>>;

/// Remote thread and run access.
#[async_trait]
pub trait RunTransport: Send + Sync {
    /// Add a message to the remote thread
    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), TransportError>;

    /// Start the agent on the thread and open its event stream
    async fn open_run_stream(
        &self,
        thread_id: &str,
        agent_id: &str,
    ) -> Result<RawEventStream, TransportError>;
}

/// Drives turns against one remote thread and agent.
#[derive(Clone)]
pub struct ConversationDriver {
    transport: Arc<dyn RunTransport>,
    registry: Arc<ToolRegistry>,
    thread_id: String,
    agent_id: String,
}

impl ConversationDriver {
    pub fn new(
        transport: Arc<dyn RunTransport>,
        registry: Arc<ToolRegistry>,
        thread_id: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            registry,
            thread_id: thread_id.into(),
            agent_id: agent_id.into(),
        }
    }

    /// Build a driver from configuration
    pub fn from_config(transport: Arc<dyn RunTransport>, config: &ConversationConfig) -> Self {
        Self::new(
            transport,
            Arc::new(config.build_registry()),
            config.thread_id.clone(),
            config.agent_id.clone(),
        )
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one turn, yielding a snapshot after each state change.
    ///
    /// The first snapshot (history plus the new user message) is yielded
    /// before any network call. Transport failures are yielded once as an
    /// error and end the stream. A failure after streaming started is
    /// preceded by a snapshot with every bubble marked done.
    pub fn stream_user_message(
        &self,
        user_message: impl Into<String>,
        history: impl IntoIterator<Item = ChatMessage>,
    ) -> SnapshotStream {
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        let thread_id = self.thread_id.clone();
        let agent_id = self.agent_id.clone();
        let user_message = user_message.into();
        let history: Vec<ChatMessage> = history.into_iter().collect();

        let stream = async_stream::stream! {
            let mut turn = Turn::new(registry);
            yield Ok(turn.seed(history, &user_message));

            if let Err(err) = transport
                .post_message(&thread_id, MessageRole::User, &user_message)
                .await
            {
                tracing::error!(thread_id = %thread_id, error = %err, "failed to create user message");
                turn.abort();
                yield Err(ConversationError::Post(err));
                return;
            }

            let mut events = match transport.open_run_stream(&thread_id, &agent_id).await {
                Ok(events) => events,
                Err(err) => {
                    tracing::error!(thread_id = %thread_id, agent_id = %agent_id, error = %err, "failed to open run stream");
                    turn.abort();
                    yield Err(ConversationError::OpenStream(err));
                    return;
                }
            };

            turn.begin_streaming();
            while let Some(item) = events.next().await {
                let raw = match item {
                    Ok(raw) => raw,
                    Err(err) => {
                        tracing::error!(thread_id = %thread_id, error = %err, "failed to stream conversation");
                        turn.abort();
                        yield Ok(turn.snapshot());
                        yield Err(ConversationError::Stream(err));
                        return;
                    }
                };
                tracing::trace!(event_type = %raw.event_type, "received run event");

                let event = match raw.decode() {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = ?err, "skipping malformed run event");
                        continue;
                    }
                };

                match turn.apply(event) {
                    Applied::Ignored => {}
                    Applied::Changed => {
                        yield Ok(turn.snapshot());
                    }
                    Applied::Finished => {
                        yield Ok(turn.snapshot());
                        break;
                    }
                }
            }
            drop(events);

            // Upstream closed without a terminal event
            if !turn.phase().is_terminal() {
                turn.finish();
                yield Ok(turn.snapshot());
            }
        };

        Box::pin(stream)
    }

    /// Run one turn to completion and return its final snapshot
    pub async fn run_turn(
        &self,
        user_message: impl Into<String>,
        history: impl IntoIterator<Item = ChatMessage>,
    ) -> Result<Snapshot, ConversationError> {
        let mut snapshots = self.stream_user_message(user_message, history);
        let mut last = Snapshot::default();
        while let Some(snapshot) = snapshots.next().await {
            last = snapshot?;
        }
        Ok(last)
    }
}

impl std::fmt::Debug for ConversationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationDriver")
            .field("thread_id", &self.thread_id)
            .field("agent_id", &self.agent_id)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
