//! Bounded staging of documents for bulk operations.
//!
//! `BoundedBatch` is a plain value type with no knowledge of the engine.
//! `BufferedAccumulator` binds one to an engine client and sends every full
//! window as a single add-only transaction.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchEngineClient;
use crate::transaction::UpdateTransaction;
use solr_indexer_shared::SearchDocument;

/// Number of documents staged before a bulk flush.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Staging buffer that hands out a full window once `threshold` items are staged.
#[derive(Debug, Clone)]
pub struct BoundedBatch<T> {
    staged: Vec<T>,
    threshold: usize,
}

impl<T> BoundedBatch<T> {
    /// Create a batch flushing every `threshold` items (at least one).
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            staged: Vec::with_capacity(threshold),
            threshold,
        }
    }

    /// Stage an item. Returns the full window when the threshold is reached.
    pub fn stage(&mut self, item: T) -> Option<Vec<T>> {
        self.staged.push(item);
        if self.staged.len() >= self.threshold {
            self.flush()
        } else {
            None
        }
    }

    /// Drain whatever is staged, or `None` when nothing is.
    pub fn flush(&mut self) -> Option<Vec<T>> {
        if self.staged.is_empty() {
            return None;
        }
        let window = std::mem::replace(&mut self.staged, Vec::with_capacity(self.threshold));
        Some(window)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl<T> Default for BoundedBatch<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// Buffered document writer used by full reindex passes.
///
/// Bounds in-flight documents to the batch threshold. Commits are left to the
/// caller so a pass can finish with a single optimize and commit.
pub struct BufferedAccumulator {
    engine: Arc<dyn SearchEngineClient>,
    batch: BoundedBatch<SearchDocument>,
    flushes: usize,
    documents_sent: usize,
}

impl BufferedAccumulator {
    /// Create an accumulator flushing every `threshold` documents.
    pub fn new(engine: Arc<dyn SearchEngineClient>, threshold: usize) -> Self {
        Self {
            engine,
            batch: BoundedBatch::new(threshold),
            flushes: 0,
            documents_sent: 0,
        }
    }

    /// Stage a document, sending the window to the engine when it is full.
    pub async fn add(&mut self, document: SearchDocument) -> Result<(), SearchIndexError> {
        if let Some(window) = self.batch.stage(document) {
            self.send(window).await?;
        }
        Ok(())
    }

    /// Send any documents still staged.
    pub async fn flush(&mut self) -> Result<(), SearchIndexError> {
        if let Some(window) = self.batch.flush() {
            self.send(window).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, window), fields(count = window.len()))]
    async fn send(&mut self, window: Vec<SearchDocument>) -> Result<(), SearchIndexError> {
        let count = window.len();
        let mut transaction = UpdateTransaction::new();
        for document in window {
            transaction.add(document);
        }

        debug!(count = count, "Flushing documents to search engine");

        if let Err(e) = self.engine.execute(&transaction).await {
            error!(error = %e, count = count, "Failed to flush buffered documents");
            return Err(e);
        }

        self.flushes += 1;
        self.documents_sent += count;
        Ok(())
    }

    /// Number of windows sent so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Number of documents sent so far.
    pub fn documents_sent(&self) -> usize {
        self.documents_sent
    }

    /// Number of documents staged but not sent.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }
}
