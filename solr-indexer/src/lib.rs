//! # Solr Indexer
//!
//! Keeps a Solr full-text index in sync with a hierarchical content store.
//!
//! ## Architecture
//!
//! 1. **Indexers**: one per content kind. Leaf indexers (node sources, media
//!    documents) own search documents; cascading indexers (nodes, tags,
//!    folders) recompute the leaf documents depending on them
//! 2. **Factory**: resolves a content kind or class name to its indexer
//! 3. **Handlers**: turn reindex/delete messages into best-effort indexer calls
//! 4. **Orchestrator**: pulls messages from a source and drives the handlers
//! 5. **Reindex job**: rebuilds one batch of the whole corpus
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Index messages and the channel carrying them
//! - [`errors`]: Error types for the indexer
//! - [`factory`]: Content kind to indexer registry
//! - [`handlers`]: Reindex and delete message handlers
//! - [`indexer`]: The indexer contract and its implementations
//! - [`mapper`]: Content item to search document mapping
//! - [`orchestrator`]: Message loop
//! - [`reindex`]: Full reindex job
//! - [`telemetry`]: Tracing initialization

pub mod config;
pub mod consumer;
pub mod errors;
pub mod factory;
pub mod handlers;
pub mod indexer;
pub mod mapper;
pub mod orchestrator;
pub mod reindex;
pub mod telemetry;

pub use config::{ContentSources, Dependencies, IndexerConfig};
pub use errors::{HandlerError, IndexerError, IngestError};
pub use factory::IndexerFactory;
pub use indexer::Indexer;
pub use reindex::ReindexJob;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
