//! Indexers keep the search index in sync with one content kind each.
//!
//! Leaf indexers (`NodeSource`, `Document`) own search documents. Cascading
//! indexers (`Node`, `Tag`, `Folder`) own none and recompute the leaf
//! documents that depend on them.

mod base;
mod folder;
mod leaf;
mod node;
mod tag;

pub use base::IndexerBase;
pub use folder::FolderIndexer;
pub use leaf::{LeafIndexer, ReindexSettings, ReindexSummary};
pub use node::NodeIndexer;
pub use tag::TagIndexer;

use async_trait::async_trait;

use crate::errors::IndexerError;
use solr_indexer_shared::{BatchDescriptor, ContentId, ContentKind, ExecutionMode};

/// Uniform contract shared by every indexer.
///
/// `index` and `delete` honour the execution mode: in `BestEffort` a failure is
/// logged once and swallowed, in `Strict` it is returned. A missing item is a
/// no-op in both modes. The administrative operations are always strict.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// The content kind this indexer handles.
    fn kind(&self) -> ContentKind;

    /// Shared engine access and failure policy.
    fn base(&self) -> &IndexerBase;

    /// Create or refresh the search documents derived from `id`.
    async fn index(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError>;

    /// Remove (leaf) or recompute (cascading) the documents derived from `id`.
    async fn delete(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError>;

    /// Rebuild one batch of the whole corpus. Leaf kinds only.
    async fn reindex_all(&self, batch: BatchDescriptor) -> Result<ReindexSummary, IndexerError> {
        let _ = batch;
        Err(IndexerError::unsupported(self.kind(), "reindex_all"))
    }

    /// Delete every document of `kind_filter`, or the whole index, then commit.
    async fn empty(&self, kind_filter: Option<ContentKind>) -> Result<(), IndexerError> {
        self.base().empty(kind_filter).await
    }

    /// Ask the engine to merge its segments.
    async fn optimize(&self) -> Result<(), IndexerError> {
        self.base().optimize().await
    }

    /// Make staged changes visible.
    async fn commit(&self) -> Result<(), IndexerError> {
        self.base().commit().await
    }
}
