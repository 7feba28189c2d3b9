//! Leaf indexers: content kinds that map directly to search documents.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use tracing::{debug, info, instrument};

use crate::errors::IndexerError;
use crate::indexer::{Indexer, IndexerBase};
use crate::mapper::DocumentMapper;
use solr_indexer_repository::utils::item_query;
use solr_indexer_repository::{
    BufferedAccumulator, ContentSource, Paginator, SearchEngineClient, UpdateTransaction,
    DEFAULT_BUFFER_SIZE, DEFAULT_PAGE_SIZE,
};
use solr_indexer_shared::{
    BatchDescriptor, ContentId, ContentKind, Document, ExecutionMode, NodeSource,
};

/// Tuning of full reindex passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReindexSettings {
    /// Documents staged before each bulk flush.
    pub buffer_size: usize,
    /// Items fetched per content source page.
    pub page_size: u64,
}

impl Default for ReindexSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Outcome of one full reindex batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexSummary {
    pub kind: ContentKind,
    pub batch: BatchDescriptor,
    /// Size of the whole corpus when the pass started.
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
    /// Content items read from the source.
    pub items: u64,
    /// Search documents sent to the engine.
    pub documents: usize,
    /// Bulk requests sent to the engine.
    pub flushes: usize,
}

/// Indexer for a content kind whose items are stored as search documents.
pub struct LeafIndexer<T: Send + Sync + 'static> {
    kind: ContentKind,
    source: Arc<dyn ContentSource<T>>,
    mapper: Arc<dyn DocumentMapper<T>>,
    base: IndexerBase,
    settings: ReindexSettings,
}

impl LeafIndexer<NodeSource> {
    /// Indexer for node sources.
    pub fn node_sources(
        source: Arc<dyn ContentSource<NodeSource>>,
        mapper: Arc<dyn DocumentMapper<NodeSource>>,
        engine: Arc<dyn SearchEngineClient>,
    ) -> Self {
        Self::new(ContentKind::NodeSource, source, mapper, engine)
    }
}

impl LeafIndexer<Document> {
    /// Indexer for media documents.
    pub fn documents(
        source: Arc<dyn ContentSource<Document>>,
        mapper: Arc<dyn DocumentMapper<Document>>,
        engine: Arc<dyn SearchEngineClient>,
    ) -> Self {
        Self::new(ContentKind::Document, source, mapper, engine)
    }
}

impl<T: Send + Sync + 'static> LeafIndexer<T> {
    fn new(
        kind: ContentKind,
        source: Arc<dyn ContentSource<T>>,
        mapper: Arc<dyn DocumentMapper<T>>,
        engine: Arc<dyn SearchEngineClient>,
    ) -> Self {
        Self {
            kind,
            source,
            mapper,
            base: IndexerBase::new(engine),
            settings: ReindexSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ReindexSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Stage an upsert of every document derived from `id`.
    ///
    /// Returns `false` when the item does not exist.
    pub async fn stage_upsert(
        &self,
        id: ContentId,
        transaction: &mut UpdateTransaction,
    ) -> Result<bool, IndexerError> {
        let Some(item) = self.source.find(id).await? else {
            debug!(kind = %self.kind, id = id, "Content not found, skipping upsert");
            return Ok(false);
        };

        self.stage_upsert_item(id, &item, transaction)?;
        Ok(true)
    }

    /// Stage an upsert of an item already loaded by the caller.
    ///
    /// An item that maps to no document has its documents removed instead.
    pub fn stage_upsert_item(
        &self,
        id: ContentId,
        item: &T,
        transaction: &mut UpdateTransaction,
    ) -> Result<(), IndexerError> {
        let documents = self.mapper.map(item)?;
        if documents.is_empty() || self.mapper.has_variable_documents() {
            transaction.delete_by_query(item_query(self.kind, id));
        }
        for document in documents {
            transaction.add(document);
        }
        Ok(())
    }

    /// Stage a removal of every document derived from `id`, whatever locales
    /// it was indexed under.
    ///
    /// Returns `false` when the item does not exist.
    pub async fn stage_remove(
        &self,
        id: ContentId,
        transaction: &mut UpdateTransaction,
    ) -> Result<bool, IndexerError> {
        if self.source.find(id).await?.is_none() {
            debug!(kind = %self.kind, id = id, "Content not found, skipping removal");
            return Ok(false);
        }

        transaction.delete_by_query(item_query(self.kind, id));
        Ok(true)
    }

    async fn upsert(&self, id: ContentId) -> Result<(), IndexerError> {
        let mut transaction = UpdateTransaction::new();
        if self.stage_upsert(id, &mut transaction).await? {
            transaction.commit();
            self.base.execute(&transaction).await?;
        }
        Ok(())
    }

    async fn remove(&self, id: ContentId) -> Result<(), IndexerError> {
        let mut transaction = UpdateTransaction::new();
        if self.stage_remove(id, &mut transaction).await? {
            transaction.commit();
            self.base.execute(&transaction).await?;
        }
        Ok(())
    }

    /// Stream one batch of the corpus into the engine through a bounded buffer,
    /// then optimize and commit once. Failures propagate.
    #[instrument(skip(self, batch), fields(kind = %self.kind, batch = %batch))]
    pub async fn reindex(&self, batch: BatchDescriptor) -> Result<ReindexSummary, IndexerError> {
        let total = self.source.count().await?;
        let (offset, limit) = batch.window(total);

        info!(total = total, offset = offset, limit = limit, "Starting full reindex");

        let mut accumulator =
            BufferedAccumulator::new(self.base.engine().clone(), self.settings.buffer_size);
        let mut items = 0u64;

        let mut stream = Paginator::new(self.source.as_ref(), offset, limit)
            .with_page_size(self.settings.page_size)
            .into_stream();

        while let Some(item) = stream.try_next().await? {
            for document in self.mapper.map(&item)? {
                accumulator.add(document).await?;
            }
            self.source.detach(item);
            items += 1;
        }
        drop(stream);

        accumulator.flush().await?;
        self.base.optimize().await?;
        self.base.commit().await?;

        let summary = ReindexSummary {
            kind: self.kind,
            batch,
            total,
            offset,
            limit,
            items,
            documents: accumulator.documents_sent(),
            flushes: accumulator.flushes(),
        };

        info!(
            items = summary.items,
            documents = summary.documents,
            flushes = summary.flushes,
            "Full reindex completed"
        );
        Ok(summary)
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Indexer for LeafIndexer<T> {
    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn base(&self) -> &IndexerBase {
        &self.base
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn index(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.upsert(id).await;
        self.base.settle(outcome, mode, self.kind, id, "index")
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn delete(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.remove(id).await;
        self.base.settle(outcome, mode, self.kind, id, "delete")
    }

    async fn reindex_all(&self, batch: BatchDescriptor) -> Result<ReindexSummary, IndexerError> {
        self.reindex(batch).await
    }
}
