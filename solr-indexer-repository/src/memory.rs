//! In-memory content source.
//!
//! Keeps items ordered by id, which gives `slice` the stable ordering the
//! paginator relies on. Useful for tests and for feeding the indexers from a
//! snapshot without a database. Records slice calls and detached items so
//! callers can assert on paging behaviour.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use crate::errors::ContentSourceError;
use crate::interfaces::ContentSource;
use solr_indexer_shared::{ContentId, ContentItem};

/// Content source backed by an ordered map.
pub struct InMemoryContentSource<T> {
    items: RwLock<BTreeMap<ContentId, T>>,
    slice_calls: Mutex<Vec<(u64, u64)>>,
    detached: AtomicUsize,
}

impl<T: ContentItem + Clone> InMemoryContentSource<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            slice_calls: Mutex::new(Vec::new()),
            detached: AtomicUsize::new(0),
        }
    }

    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let source = Self::new();
        for item in items {
            source.insert(item);
        }
        source
    }

    /// Insert or replace an item.
    pub fn insert(&self, item: T) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.content_id(), item);
    }

    /// Remove an item, returning it if it existed.
    pub fn remove(&self, id: ContentId) -> Option<T> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// `(offset, limit)` of every slice call so far.
    pub fn slice_calls(&self) -> Vec<(u64, u64)> {
        self.slice_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of items released through `detach`.
    pub fn detached(&self) -> usize {
        self.detached.load(Ordering::Relaxed)
    }
}

impl<T: ContentItem + Clone> Default for InMemoryContentSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> ContentSource<T> for InMemoryContentSource<T>
where
    T: ContentItem + Clone + Send + Sync + 'static,
{
    async fn find(&self, id: ContentId) -> Result<Option<T>, ContentSourceError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(&id).cloned())
    }

    async fn count(&self) -> Result<u64, ContentSourceError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.len() as u64)
    }

    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, ContentSourceError> {
        self.slice_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((offset, limit));

        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn detach(&self, item: T) {
        self.detached.fetch_add(1, Ordering::Relaxed);
        drop(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solr_indexer_shared::Folder;

    fn folder(id: ContentId) -> Folder {
        Folder {
            id,
            name: format!("folder-{}", id),
            documents: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_slice_is_ordered_by_id() {
        let source = InMemoryContentSource::with_items([folder(3), folder(1), folder(2)]);

        let ids: Vec<_> = source
            .slice(0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(source.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let source = InMemoryContentSource::with_items([folder(1)]);

        assert!(source.find(1).await.unwrap().is_some());
        source.remove(1);
        assert!(source.find(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detach_is_counted() {
        let source = InMemoryContentSource::with_items([folder(1)]);
        let item = source.find(1).await.unwrap().unwrap();

        source.detach(item);

        assert_eq!(source.detached(), 1);
    }
}
