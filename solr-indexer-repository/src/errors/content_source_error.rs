//! Content source error types.

use thiserror::Error;

/// Errors raised by a `ContentSource` implementation.
///
/// A missing item is not an error: `find` returns `Ok(None)` for it.
#[derive(Debug, Clone, Error)]
pub enum ContentSourceError {
    /// The backing store could not be reached.
    #[error("Content source unavailable: {0}")]
    Unavailable(String),

    /// A lookup, count or slice query failed.
    #[error("Content query error: {0}")]
    QueryError(String),
}

impl ContentSourceError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }
}
