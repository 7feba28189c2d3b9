//! Node indexer: fans out to the node's per-language node sources.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::errors::IndexerError;
use crate::indexer::{Indexer, IndexerBase, LeafIndexer};
use solr_indexer_repository::{ContentSource, UpdateTransaction};
use solr_indexer_shared::{ContentId, ContentKind, ExecutionMode, Node, NodeSource};

/// What to stage for every node source of a node.
#[derive(Debug, Clone, Copy)]
enum FanOut {
    Upsert,
    Remove,
}

/// Cascading indexer for nodes.
///
/// A node has no document of its own: indexing it upserts every node source,
/// deleting it removes every node source, each in a single transaction with a
/// single commit.
pub struct NodeIndexer {
    nodes: Arc<dyn ContentSource<Node>>,
    node_sources: Arc<LeafIndexer<NodeSource>>,
    base: IndexerBase,
}

impl NodeIndexer {
    pub fn new(
        nodes: Arc<dyn ContentSource<Node>>,
        node_sources: Arc<LeafIndexer<NodeSource>>,
    ) -> Self {
        let base = node_sources.base().clone();
        Self {
            nodes,
            node_sources,
            base,
        }
    }

    async fn fan_out(&self, id: ContentId, fan_out: FanOut) -> Result<(), IndexerError> {
        let Some(node) = self.nodes.find(id).await? else {
            debug!(id = id, "Node not found, skipping");
            return Ok(());
        };

        let mut transaction = UpdateTransaction::new();
        for source_id in &node.node_sources {
            match fan_out {
                FanOut::Upsert => {
                    self.node_sources
                        .stage_upsert(*source_id, &mut transaction)
                        .await?
                }
                FanOut::Remove => {
                    self.node_sources
                        .stage_remove(*source_id, &mut transaction)
                        .await?
                }
            };
        }
        transaction.commit();

        self.base.execute(&transaction).await
    }
}

#[async_trait]
impl Indexer for NodeIndexer {
    fn kind(&self) -> ContentKind {
        ContentKind::Node
    }

    fn base(&self) -> &IndexerBase {
        &self.base
    }

    #[instrument(skip(self))]
    async fn index(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.fan_out(id, FanOut::Upsert).await;
        self.base.settle(outcome, mode, ContentKind::Node, id, "index")
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ContentId, mode: ExecutionMode) -> Result<(), IndexerError> {
        let outcome = self.fan_out(id, FanOut::Remove).await;
        self.base.settle(outcome, mode, ContentKind::Node, id, "delete")
    }
}
