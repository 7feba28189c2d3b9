//! Search index error types.
//!
//! This module defines the unified error type for all search engine operations.

use thiserror::Error;

/// Unified errors from search engine operations.
///
/// Used by the `SearchEngineClient` trait and everything that talks to the engine
/// through it (transactions, the buffered accumulator).
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Invalid client configuration or request input.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to reach the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The engine answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    RequestError { status: u16, body: String },

    /// Failed to parse a response from the engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize an update payload.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a request error from a response status and body.
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Self::RequestError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Returns true for failures caused by the engine being unreachable or
    /// overloaded rather than by the request itself.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::Timeout(_) => true,
            Self::RequestError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SearchIndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            Self::connection(err.to_string())
        } else if err.is_decode() {
            Self::parse(err.to_string())
        } else {
            Self::connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchIndexError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
