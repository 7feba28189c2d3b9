//! Error types for document mapping.

use thiserror::Error;

use solr_indexer_shared::{ContentId, ContentKind};

/// A content item that cannot be turned into search documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot map {kind} {id}: {reason}")]
pub struct MappingError {
    pub kind: ContentKind,
    pub id: ContentId,
    pub reason: String,
}

impl MappingError {
    pub fn new(kind: ContentKind, id: ContentId, reason: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            reason: reason.into(),
        }
    }
}
