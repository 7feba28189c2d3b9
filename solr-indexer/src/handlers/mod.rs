//! Message handlers turning index messages into indexer calls.
//!
//! Both handlers share the same guard and failure policy: a message without a
//! real identifier is ignored, indexers run in best-effort mode, and only a
//! configuration error (an unknown or unwired class name) reaches the caller.

mod delete;
mod reindex;

pub use delete::DeleteHandler;
pub use reindex::ReindexHandler;

use std::sync::Arc;

use tracing::error;

use crate::errors::HandlerError;
use crate::factory::IndexerFactory;
use crate::indexer::Indexer;
use solr_indexer_shared::ContentId;

/// What a handler did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The message carried no usable identifier.
    Skipped,
    /// The message was passed to an indexer.
    Dispatched,
}

/// An identifier worth dispatching: present and non-zero.
pub(crate) fn actionable_identifier(identifier: Option<ContentId>) -> Option<ContentId> {
    identifier.filter(|id| *id != 0)
}

/// Resolve the indexer for `classname`, logging a configuration error once.
pub(crate) fn resolve(
    factory: &IndexerFactory,
    classname: &str,
    id: ContentId,
) -> Result<Arc<dyn Indexer>, HandlerError> {
    factory.indexer_for_class(classname).map_err(|e| {
        error!(classname = classname, id = id, error = %e, "Cannot resolve indexer for message");
        HandlerError::from(e)
    })
}
