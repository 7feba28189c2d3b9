//! Error types for indexers and the indexer factory.

use thiserror::Error;

use crate::errors::MappingError;
use solr_indexer_repository::{ContentSourceError, SearchIndexError};
use solr_indexer_shared::{ContentId, ContentKind, DescriptorError};

/// Errors raised by indexers.
///
/// In best-effort mode only `Configuration` and `Unsupported` can escape an
/// indexer; everything else is logged and absorbed.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Wiring or deployment bug, such as an unknown content kind.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The search engine rejected a request or could not be reached.
    #[error("Search engine error: {0}")]
    Engine(#[from] SearchIndexError),

    /// The content source failed.
    #[error("Content source error: {0}")]
    Source(#[from] ContentSourceError),

    /// A content item could not be mapped to search documents.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The operation does not apply to this kind.
    #[error("{kind} indexer does not support {operation}")]
    Unsupported {
        kind: ContentKind,
        operation: &'static str,
    },

    /// A cascading item is deleted while dependents still reference it.
    #[error("{kind} {id} is still referenced by {dependents} dependent item(s)")]
    StaleAssociation {
        kind: ContentKind,
        id: ContentId,
        dependents: usize,
    },

    /// Invalid batch descriptor.
    #[error("Batch error: {0}")]
    Batch(#[from] DescriptorError),
}

impl IndexerError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an unsupported operation error.
    pub fn unsupported(kind: ContentKind, operation: &'static str) -> Self {
        Self::Unsupported { kind, operation }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
