//! # Solr Indexer Shared
//!
//! This crate defines the data structures shared across the Solr indexer crates:
//! content kinds and content item snapshots, the search document sent to the
//! engine, and the batch/execution descriptors used by indexers.

pub mod errors;
pub mod types;

pub use errors::DescriptorError;
pub use types::batch::{BatchDescriptor, ExecutionMode};
pub use types::content::{
    ContentId, ContentItem, Document, DocumentTranslation, Folder, Node, NodeSource, Tag,
};
pub use types::content_kind::ContentKind;
pub use types::search_document::SearchDocument;
