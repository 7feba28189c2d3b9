//! Document mappers.
//!
//! A mapper turns one leaf content item into the search documents that
//! represent it. Mappers are pure: they never talk to the engine or the store.

mod document;
mod node_source;

pub use document::DocumentAssetMapper;
pub use node_source::NodeSourceMapper;

use crate::errors::MappingError;
use solr_indexer_shared::SearchDocument;

/// Per-kind translation of a content item into search documents.
pub trait DocumentMapper<T>: Send + Sync {
    /// Documents to upsert for `item`. An empty list means the item should not
    /// be searchable right now.
    fn map(&self, item: &T) -> Result<Vec<SearchDocument>, MappingError>;

    /// Whether the documents of one item can come and go between two edits,
    /// as with per-translation documents. Upserts then clear every document
    /// of the item before adding the current ones.
    fn has_variable_documents(&self) -> bool {
        false
    }
}
