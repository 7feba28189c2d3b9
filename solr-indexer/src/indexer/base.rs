//! Engine access and failure policy shared by all indexers.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::errors::IndexerError;
use solr_indexer_repository::utils::kind_query;
use solr_indexer_repository::{SearchEngineClient, UpdateTransaction};
use solr_indexer_shared::{ContentId, ContentKind, ExecutionMode};

/// Holds the engine client and applies the execution-mode policy in one place.
#[derive(Clone)]
pub struct IndexerBase {
    engine: Arc<dyn SearchEngineClient>,
}

impl IndexerBase {
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<dyn SearchEngineClient> {
        &self.engine
    }

    /// Send a transaction. Transactions without any document operation are
    /// not worth a round trip and are dropped.
    pub async fn execute(&self, transaction: &UpdateTransaction) -> Result<(), IndexerError> {
        if transaction.is_directive_only() {
            debug!("Nothing staged, skipping engine call");
            return Ok(());
        }
        self.engine.execute(transaction).await?;
        Ok(())
    }

    /// Resolve the outcome of a single-item operation according to `mode`.
    ///
    /// Best-effort failures are logged exactly once here; the index may stay
    /// stale until the next edit or a full reindex.
    pub fn settle(
        &self,
        outcome: Result<(), IndexerError>,
        mode: ExecutionMode,
        kind: ContentKind,
        id: ContentId,
        operation: &'static str,
    ) -> Result<(), IndexerError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if mode.is_strict() => Err(e),
            Err(e) => {
                error!(
                    kind = %kind,
                    id = id,
                    operation = operation,
                    error = %e,
                    "Indexing failed, search index may be stale"
                );
                Ok(())
            }
        }
    }

    /// Delete by kind (or everything) and commit.
    pub async fn empty(&self, kind_filter: Option<ContentKind>) -> Result<(), IndexerError> {
        let query = kind_query(kind_filter);
        let mut transaction = UpdateTransaction::new();
        transaction.delete_by_query(query.clone()).commit();

        self.engine.execute(&transaction).await?;

        info!(query = %query, "Emptied search index");
        Ok(())
    }

    pub async fn optimize(&self) -> Result<(), IndexerError> {
        let mut transaction = UpdateTransaction::new();
        transaction.optimize();
        self.engine.execute(&transaction).await?;
        Ok(())
    }

    pub async fn commit(&self) -> Result<(), IndexerError> {
        let mut transaction = UpdateTransaction::new();
        transaction.commit();
        self.engine.execute(&transaction).await?;
        Ok(())
    }
}
