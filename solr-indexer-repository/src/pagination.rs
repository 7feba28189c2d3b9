//! Offset/limit paginator over a content source window.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::trace;

use crate::errors::ContentSourceError;
use crate::interfaces::ContentSource;

/// Number of items fetched per page.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Streams a fixed `(offset, limit)` window of a content source page by page.
///
/// The window is fixed up front, so rows inserted while the stream runs
/// never push the paginator past its window. Each page is one `slice` call
/// over the source's stable ordering.
pub struct Paginator<'a, T: Send + 'static> {
    source: &'a dyn ContentSource<T>,
    offset: u64,
    limit: u64,
    page_size: u64,
}

impl<'a, T: Send + 'static> Paginator<'a, T> {
    pub fn new(source: &'a dyn ContentSource<T>, offset: u64, limit: u64) -> Self {
        Self {
            source,
            offset,
            limit,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Turn the window into a stream of items.
    ///
    /// The stream ends when the window is exhausted or the source returns an
    /// empty page, whichever comes first.
    pub fn into_stream(self) -> BoxStream<'a, Result<T, ContentSourceError>> {
        let Paginator {
            source,
            offset,
            limit,
            page_size,
        } = self;

        let pages = stream::try_unfold(0u64, move |cursor| async move {
            if cursor >= limit {
                return Ok(None);
            }

            let size = page_size.min(limit - cursor);
            let mut page = source.slice(offset + cursor, size).await?;
            page.truncate(size as usize);

            trace!(offset = offset + cursor, size = page.len(), "Fetched page");

            if page.is_empty() {
                return Ok(None);
            }

            let next = cursor + page.len() as u64;
            Ok(Some((page, next)))
        });

        pages
            .map_ok(|page| stream::iter(page.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryContentSource;
    use futures::TryStreamExt;
    use solr_indexer_shared::Tag;

    fn tags(count: u64) -> InMemoryContentSource<Tag> {
        InMemoryContentSource::with_items((1..=count).map(|id| Tag {
            id,
            name: format!("tag-{}", id),
            nodes: Vec::new(),
        }))
    }

    #[tokio::test]
    async fn test_streams_window_in_pages() {
        let source = tags(25);

        let ids: Vec<u64> = Paginator::new(&source, 5, 12)
            .with_page_size(5)
            .into_stream()
            .map_ok(|tag| tag.id)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(ids, (6..=17).collect::<Vec<_>>());
        assert_eq!(source.slice_calls(), vec![(5, 5), (10, 5), (15, 2)]);
    }

    #[tokio::test]
    async fn test_stops_on_short_source() {
        let source = tags(3);

        let ids: Vec<u64> = Paginator::new(&source, 0, 10)
            .with_page_size(2)
            .into_stream()
            .map_ok(|tag| tag.id)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_window_does_not_query() {
        let source = tags(3);

        let items: Vec<Tag> = Paginator::new(&source, 3, 0)
            .into_stream()
            .try_collect()
            .await
            .unwrap();

        assert!(items.is_empty());
        assert!(source.slice_calls().is_empty());
    }
}
