//! Read-only content source trait definition.

use async_trait::async_trait;

use crate::errors::ContentSourceError;
use solr_indexer_shared::ContentId;

/// Minimal read access to one kind of content item.
///
/// This is the only contract the indexers need from the persistence layer.
/// `slice` must page over a stable ordering (typically by id) so successive
/// windows neither skip nor repeat items.
#[async_trait]
pub trait ContentSource<T: Send + 'static>: Send + Sync {
    /// Look up one item. A missing item is `Ok(None)`.
    async fn find(&self, id: ContentId) -> Result<Option<T>, ContentSourceError>;

    /// Total number of items of this kind.
    async fn count(&self) -> Result<u64, ContentSourceError>;

    /// Up to `limit` items starting at `offset` in the stable ordering.
    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, ContentSourceError>;

    /// Release an item from any in-process identity cache once it has been
    /// mapped, so long reindex passes do not accumulate every item in memory.
    fn detach(&self, item: T) {
        drop(item);
    }
}
