//! Error types for the Solr indexer.

mod handler;
mod indexer;
mod ingest;
mod mapping;

pub use handler::HandlerError;
pub use indexer::IndexerError;
pub use ingest::IngestError;
pub use mapping::MappingError;
