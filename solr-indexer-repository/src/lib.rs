//! # Solr Indexer Repository
//!
//! This crate provides the seams between the indexers and the outside world:
//! the search engine client and content source traits, the Solr HTTP
//! implementation, update transactions, bounded staging for bulk operations
//! and a stable paginator over content sources.

pub mod batch;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod pagination;
pub mod solr;
pub mod transaction;
pub mod utils;

pub use batch::{BoundedBatch, BufferedAccumulator, DEFAULT_BUFFER_SIZE};
pub use config::SolrConfig;
pub use errors::{ContentSourceError, SearchIndexError};
pub use interfaces::{ContentSource, SearchEngineClient};
pub use memory::InMemoryContentSource;
pub use pagination::{Paginator, DEFAULT_PAGE_SIZE};
pub use solr::SolrClient;
pub use transaction::{UpdateOperation, UpdateTransaction};
