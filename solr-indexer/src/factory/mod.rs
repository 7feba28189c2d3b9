//! Registry resolving content kinds to their indexers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::errors::IndexerError;
use crate::indexer::Indexer;
use solr_indexer_shared::ContentKind;

/// Maps each content kind to the indexer responsible for it.
///
/// A missing entry is a wiring bug, reported as
/// [`IndexerError::Configuration`] rather than a panic.
#[derive(Clone, Default)]
pub struct IndexerFactory {
    indexers: HashMap<ContentKind, Arc<dyn Indexer>>,
}

/// Builder for [`IndexerFactory`].
#[derive(Default)]
pub struct IndexerFactoryBuilder {
    indexers: HashMap<ContentKind, Arc<dyn Indexer>>,
}

impl IndexerFactoryBuilder {
    /// Register an indexer under the kind it reports. A later registration
    /// for the same kind replaces the earlier one.
    pub fn register(mut self, indexer: Arc<dyn Indexer>) -> Self {
        self.indexers.insert(indexer.kind(), indexer);
        self
    }

    pub fn build(self) -> IndexerFactory {
        IndexerFactory {
            indexers: self.indexers,
        }
    }
}

impl IndexerFactory {
    pub fn builder() -> IndexerFactoryBuilder {
        IndexerFactoryBuilder::default()
    }

    /// The indexer registered for `kind`.
    pub fn indexer_for(&self, kind: ContentKind) -> Result<Arc<dyn Indexer>, IndexerError> {
        self.indexers.get(&kind).cloned().ok_or_else(|| {
            IndexerError::configuration(format!("No indexer registered for {}", kind))
        })
    }

    /// The indexer for a class name as carried by messages.
    pub fn indexer_for_class(&self, class_name: &str) -> Result<Arc<dyn Indexer>, IndexerError> {
        let kind: ContentKind = class_name
            .parse()
            .map_err(|e| IndexerError::configuration(format!("{}", e)))?;
        debug!(class_name = class_name, kind = %kind, "Resolved indexer");
        self.indexer_for(kind)
    }

    /// Registered leaf indexers, in [`ContentKind::ALL`] order.
    pub fn leaf_indexers(&self) -> Vec<Arc<dyn Indexer>> {
        ContentKind::ALL
            .into_iter()
            .filter(ContentKind::is_leaf)
            .filter_map(|kind| self.indexers.get(&kind).cloned())
            .collect()
    }

    /// Registered kinds, in [`ContentKind::ALL`] order.
    pub fn kinds(&self) -> Vec<ContentKind> {
        ContentKind::ALL
            .into_iter()
            .filter(|kind| self.indexers.contains_key(kind))
            .collect()
    }
}
