//! Error types for the message consumer loop.

use thiserror::Error;

use crate::errors::HandlerError;

/// Errors that can occur while consuming index messages.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Error returned by a message handler.
    #[error("Handler error: {0}")]
    HandlerError(#[from] HandlerError),

    /// Error parsing or decoding a message.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Channel communication error.
    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl IngestError {
    /// Create a channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::ChannelError(msg.into())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
