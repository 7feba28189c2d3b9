//! Error types for the Solr indexer repository.
//!
//! `SearchIndexError` covers the search engine side, `ContentSourceError` the
//! read-only content store side.

mod content_source_error;
mod search_index_error;

pub use content_source_error::ContentSourceError;
pub use search_index_error::SearchIndexError;
