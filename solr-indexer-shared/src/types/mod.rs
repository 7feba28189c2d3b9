//! This module defines the core data structures used across the Solr indexer.

pub mod batch;
pub mod content;
pub mod content_kind;
pub mod search_document;

pub use batch::{BatchDescriptor, ExecutionMode};
pub use content_kind::ContentKind;
pub use search_document::SearchDocument;
