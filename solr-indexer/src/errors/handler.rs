//! Error types for the message handlers.

use thiserror::Error;

use crate::errors::IndexerError;

/// Errors surfaced by the reindex and delete message handlers.
///
/// Engine failures never reach this type: handlers run indexers in best-effort
/// mode, which absorbs them.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The message names a content kind no indexer is wired for.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An indexer failure that best-effort mode did not absorb.
    #[error("Indexer error: {0}")]
    Indexer(IndexerError),
}

impl From<IndexerError> for HandlerError {
    fn from(err: IndexerError) -> Self {
        match err {
            IndexerError::Configuration(msg) => Self::Configuration(msg),
            other => Self::Indexer(other),
        }
    }
}
