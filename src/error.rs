//! Error types

use thiserror::Error;

/// Boxed error carried as the source of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of the remote thread/run transport.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    /// Create a transport error with a description
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping an underlying cause
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable description
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors yielded by a conversation turn. None of these are retried.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("failed to post user message")]
    Post(#[source] TransportError),

    #[error("failed to open run stream")]
    OpenStream(#[source] TransportError),

    #[error("run stream failed")]
    Stream(#[source] TransportError),
}

/// An event or tool-call fragment that could not be interpreted.
///
/// These are logged and skipped; the stream keeps going.
#[derive(Debug, Error)]
pub enum MalformedEvent {
    #[error("invalid {event_type} payload")]
    Payload {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("function call delta is missing its index (call id: {call_id:?})")]
    MissingIndex { call_id: Option<String> },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid conversation config")]
    Json(#[from] serde_json::Error),

    #[error("conversation config field `{0}` must not be empty")]
    MissingField(&'static str),
}
