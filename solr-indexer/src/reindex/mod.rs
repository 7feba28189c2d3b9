//! Administrative full reindex over every leaf kind.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::IndexerError;
use crate::factory::IndexerFactory;
use crate::indexer::ReindexSummary;
use solr_indexer_shared::BatchDescriptor;

/// Rebuilds one batch of every leaf kind registered in a factory.
///
/// Workers started with the same batch count and distinct batch numbers
/// cover the corpus exactly once between them. Emptying the index first is
/// only allowed for a single worker, since parallel workers would wipe each
/// other's output.
pub struct ReindexJob {
    factory: Arc<IndexerFactory>,
    batch: BatchDescriptor,
    empty_first: bool,
}

impl ReindexJob {
    pub fn new(factory: Arc<IndexerFactory>, batch: BatchDescriptor) -> Self {
        Self {
            factory,
            batch,
            empty_first: false,
        }
    }

    /// Job for batch `number` out of `count`, as given on a worker's command
    /// line.
    pub fn for_batch(
        factory: Arc<IndexerFactory>,
        count: u64,
        number: u64,
    ) -> Result<Self, IndexerError> {
        Ok(Self::new(factory, BatchDescriptor::new(count, number)?))
    }

    /// Delete every document of a kind before rebuilding it.
    pub fn with_empty_first(mut self, empty_first: bool) -> Self {
        self.empty_first = empty_first;
        self
    }

    /// Run the job. The first failure aborts it.
    #[instrument(skip(self), fields(batch = %self.batch, empty_first = self.empty_first))]
    pub async fn run(&self) -> Result<Vec<ReindexSummary>, IndexerError> {
        if self.empty_first && self.batch.count() > 1 {
            return Err(IndexerError::configuration(format!(
                "Cannot empty the index from batch {}, run a single batch instead",
                self.batch
            )));
        }

        let indexers = self.factory.leaf_indexers();
        if indexers.is_empty() {
            warn!("No leaf indexer registered, nothing to reindex");
        }

        let mut summaries = Vec::with_capacity(indexers.len());
        for indexer in indexers {
            let kind = indexer.kind();
            if self.empty_first {
                indexer.empty(Some(kind)).await?;
            }
            summaries.push(indexer.reindex_all(self.batch).await?);
        }

        info!(
            kinds = summaries.len(),
            items = summaries.iter().map(|s| s.items).sum::<u64>(),
            "Reindex job completed"
        );
        Ok(summaries)
    }
}
