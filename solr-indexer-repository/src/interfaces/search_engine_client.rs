//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations and mock clients in tests.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::transaction::UpdateTransaction;

/// Abstracts the underlying search engine (Solr or a compatible server).
///
/// Every write goes through `execute`: adds, deletes, commits and optimizes are
/// staged into an `UpdateTransaction` and sent in staging order. Connection and
/// timeout handling belong to the implementation.
///
/// # Note on Upserts
///
/// There is no separate update call. Documents are keyed by a stable unique id,
/// so adding a document whose id is already indexed replaces it.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check that the engine is reachable and the target core answers.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine is ready for use
    /// * `Err(SearchIndexError)` - If the engine is unreachable or unhealthy
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Send a transaction to the engine.
    ///
    /// An empty transaction is a no-op and must not reach the engine.
    ///
    /// # Arguments
    ///
    /// * `transaction` - The staged operations, in order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine accepted every operation
    /// * `Err(SearchIndexError)` - If the request failed
    async fn execute(&self, transaction: &UpdateTransaction) -> Result<(), SearchIndexError>;
}
