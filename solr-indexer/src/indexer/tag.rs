//! Tag indexer: recomputes the node sources of every tagged node.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::errors::IndexerError;
use crate::indexer::{Indexer, IndexerBase, LeafIndexer};
use solr_indexer_repository::{ContentSource, UpdateTransaction};
use solr_indexer_shared::{ContentId, ContentKind, ExecutionMode, Node, NodeSource, Tag};

/// Staged recomputation of a tag's dependents.
struct Reconciliation {
    transaction: UpdateTransaction,
    /// Dependent nodes still listing the tag.
    still_attached: usize,
}

/// Cascading indexer for tags.
///
/// Tag names are embedded in node source documents, so both `index` and
/// `delete` reconcile: every node source of every tagged node is recomputed,
/// followed by an optimize and a commit. The two operations stage identical
/// requests.
///
/// A recompute reads associations from the content source. Deleting a tag
/// that nodes still carry would re-add the stale name, so `delete` first
/// checks the dependents: a stale association is logged and, in strict mode,
/// rejected before any engine call.
///
/// The check only sees nodes the tag still lists, and compares against each
/// node's own tag ids. Tag names already copied onto node sources are not
/// inspected: the host keeps them in sync with `node.tags`.
pub struct TagIndexer {
    tags: Arc<dyn ContentSource<Tag>>,
    nodes: Arc<dyn ContentSource<Node>>,
    node_sources: Arc<LeafIndexer<NodeSource>>,
    base: IndexerBase,
}

impl TagIndexer {
    pub fn new(
        tags: Arc<dyn ContentSource<Tag>>,
        nodes: Arc<dyn ContentSource<Node>>,
        node_sources: Arc<LeafIndexer<NodeSource>>,
    ) -> Self {
        let base = node_sources.base().clone();
        Self {
            tags,
            nodes,
            node_sources,
            base,
        }
    }

    async fn stage(&self, id: ContentId) -> Result<Option<Reconciliation>, IndexerError> {
        let Some(tag) = self.tags.find(id).await? else {
            debug!(id = id, "Tag not found, skipping");
            return Ok(None);
        };

        let mut transaction = UpdateTransaction::new();
        let mut still_attached = 0;

        for node_id in &tag.nodes {
            let Some(node) = self.nodes.find(*node_id).await? else {
                debug!(tag_id = id, node_id = node_id, "Tagged node not found, skipping");
                continue;
            };
            if node.tags.contains(&tag.id) {
                still_attached += 1;
            }
            for source_id in &node.node_sources {
                self.node_sources
                    .stage_upsert(*source_id, &mut transaction)
                    .await?;
            }
        }
        transaction.optimize().commit();

        Ok(Some(Reconciliation {
            transaction,
            still_attached,
        }))
    }

    /// Recompute every node source depending on the tag.
    pub async fn reconcile(&self, id: ContentId) -> Result<(), IndexerError> {
        match self.stage(id).await? {
            Some(reconciliation) => self.base.execute(&reconciliation.transaction).await,
            None => Ok(()),
        }
    }

    async fn reconcile_detached(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let Some(reconciliation) = self.stage(id).await? else {
            return Ok(());
        };

        if reconciliation.still_attached > 0 {
            warn!(
                id = id,
                dependents = reconciliation.still_attached,
                "Tag deleted while nodes still carry it, recomputed documents keep the stale tag"
            );
            if mode.is_strict() {
                return Err(IndexerError::StaleAssociation {
                    kind: ContentKind::Tag,
                    id,
                    dependents: reconciliation.still_attached,
                });
            }
        }

        self.base.execute(&reconciliation.transaction).await
    }
}

#[async_trait]
impl Indexer for TagIndexer {
    fn kind(&self) -> ContentKind {
        ContentKind::Tag
    }

    fn base(&self) -> &IndexerBase {
        &self.base
    }

    #[instrument(skip(self))]
    async fn index(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.reconcile(id).await;
        self.base.settle(outcome, mode, ContentKind::Tag, id, "index")
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.reconcile_detached(id, mode).await;
        self.base.settle(outcome, mode, ContentKind::Tag, id, "delete")
    }
}
