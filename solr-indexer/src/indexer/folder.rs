//! Folder indexer: recomputes the documents filed in a folder.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::errors::IndexerError;
use crate::indexer::{Indexer, IndexerBase, LeafIndexer};
use solr_indexer_repository::{ContentSource, UpdateTransaction};
use solr_indexer_shared::{ContentId, ContentKind, Document, ExecutionMode, Folder};

/// Cascading indexer for folders.
///
/// Documents carry their folder ids, so indexing or deleting a folder
/// re-upserts every document it contains, then optimizes and commits. A
/// delete while documents still list the folder is reported the same way as
/// for tags.
pub struct FolderIndexer {
    folders: Arc<dyn ContentSource<Folder>>,
    documents: Arc<dyn ContentSource<Document>>,
    document_indexer: Arc<LeafIndexer<Document>>,
    base: IndexerBase,
}

impl FolderIndexer {
    pub fn new(
        folders: Arc<dyn ContentSource<Folder>>,
        documents: Arc<dyn ContentSource<Document>>,
        document_indexer: Arc<LeafIndexer<Document>>,
    ) -> Self {
        let base = document_indexer.base().clone();
        Self {
            folders,
            documents,
            document_indexer,
            base,
        }
    }

    async fn stage(
        &self,
        id: ContentId,
    ) -> Result<Option<(UpdateTransaction, usize)>, IndexerError> {
        let Some(folder) = self.folders.find(id).await? else {
            debug!(id = id, "Folder not found, skipping");
            return Ok(None);
        };

        let mut transaction = UpdateTransaction::new();
        let mut still_filed = 0;

        for document_id in &folder.documents {
            let Some(document) = self.documents.find(*document_id).await? else {
                debug!(folder = id, id = document_id, "Document not found, skipping");
                continue;
            };
            if document.folders.contains(&folder.id) {
                still_filed += 1;
            }
            self.document_indexer
                .stage_upsert_item(*document_id, &document, &mut transaction)?;
        }
        transaction.optimize().commit();

        Ok(Some((transaction, still_filed)))
    }

    /// Recompute every document filed in the folder.
    pub async fn reconcile(&self, id: ContentId) -> Result<(), IndexerError> {
        match self.stage(id).await? {
            Some((transaction, _)) => self.base.execute(&transaction).await,
            None => Ok(()),
        }
    }

    async fn reconcile_detached(
        &self,
        id: ContentId,
        mode: ExecutionMode,
    ) -> Result<(), IndexerError> {
        let Some((transaction, still_filed)) = self.stage(id).await? else {
            return Ok(());
        };

        if still_filed > 0 {
            warn!(
                id = id,
                dependents = still_filed,
                "Folder deleted while documents still list it"
            );
            if mode.is_strict() {
                return Err(IndexerError::StaleAssociation {
                    kind: ContentKind::Folder,
                    id,
                    dependents: still_filed,
                });
            }
        }

        self.base.execute(&transaction).await
    }
}

#[async_trait]
impl Indexer for FolderIndexer {
    fn kind(&self) -> ContentKind {
        ContentKind::Folder
    }

    fn base(&self) -> &IndexerBase {
        &self.base
    }

    #[instrument(skip(self))]
    async fn index(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.reconcile(id).await;
        self.base.settle(outcome, mode, ContentKind::Folder, id, "index")
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.reconcile_detached(id, mode).await;
        self.base.settle(outcome, mode, ContentKind::Folder, id, "delete")
    }
}
