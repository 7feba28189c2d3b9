use std::sync::Arc;

use tracing::{debug, instrument};

use crate::consumer::DeleteMessage;
use crate::errors::HandlerError;
use crate::factory::IndexerFactory;
use crate::handlers::{actionable_identifier, resolve, HandlerOutcome};
use solr_indexer_shared::ExecutionMode;

/// Handles [`DeleteMessage`]s by calling `delete` on the matching indexer.
#[derive(Clone)]
pub struct DeleteHandler {
    factory: Arc<IndexerFactory>,
}

impl DeleteHandler {
    pub fn new(factory: Arc<IndexerFactory>) -> Self {
        Self { factory }
    }

    #[instrument(skip(self, message), fields(classname = %message.classname, identifier = ?message.identifier))]
    pub async fn handle(&self, message: &DeleteMessage) -> Result<HandlerOutcome, HandlerError> {
        let Some(id) = actionable_identifier(message.identifier) else {
            debug!("Delete message without identifier, ignoring");
            return Ok(HandlerOutcome::Skipped);
        };

        let indexer = resolve(&self.factory, &message.classname, id)?;
        indexer.delete(id, ExecutionMode::BestEffort).await?;
        Ok(HandlerOutcome::Dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{factory_with, RecordingIndexer};
    use solr_indexer_shared::ContentKind;

    #[tokio::test]
    async fn test_dispatches_to_delete() {
        let nodes = RecordingIndexer::new(ContentKind::Node);
        let handler = DeleteHandler::new(factory_with(nodes.clone()));

        let outcome = handler
            .handle(&DeleteMessage::new(ContentKind::Node, 9))
            .await
            .unwrap();

        assert_eq!(outcome, HandlerOutcome::Dispatched);
        assert_eq!(nodes.calls(), vec![("delete", 9, ExecutionMode::BestEffort)]);
    }

    #[tokio::test]
    async fn test_zero_identifier_is_skipped_before_resolution() {
        let handler = DeleteHandler::new(factory_with(RecordingIndexer::new(ContentKind::Node)));
        let message = DeleteMessage {
            classname: "Comment".to_string(),
            identifier: Some(0),
        };

        assert_eq!(handler.handle(&message).await.unwrap(), HandlerOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_missing_identifier_is_skipped() {
        let nodes = RecordingIndexer::new(ContentKind::Node);
        let handler = DeleteHandler::new(factory_with(nodes.clone()));
        let message = DeleteMessage {
            classname: "Node".to_string(),
            identifier: None,
        };

        assert_eq!(handler.handle(&message).await.unwrap(), HandlerOutcome::Skipped);
        assert!(nodes.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unwired_kind_is_configuration_error() {
        let handler = DeleteHandler::new(factory_with(RecordingIndexer::new(ContentKind::Node)));

        let err = handler
            .handle(&DeleteMessage::new(ContentKind::Folder, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Configuration(_)));
    }
}
