use std::sync::Arc;

use tracing::{debug, instrument};

use crate::consumer::ReindexMessage;
use crate::errors::HandlerError;
use crate::factory::IndexerFactory;
use crate::handlers::{actionable_identifier, resolve, HandlerOutcome};
use solr_indexer_shared::ExecutionMode;

/// Handles [`ReindexMessage`]s by calling `index` on the matching indexer.
#[derive(Clone)]
pub struct ReindexHandler {
    factory: Arc<IndexerFactory>,
}

impl ReindexHandler {
    pub fn new(factory: Arc<IndexerFactory>) -> Self {
        Self { factory }
    }

    #[instrument(skip(self, message), fields(classname = %message.classname, identifier = ?message.identifier))]
    pub async fn handle(&self, message: &ReindexMessage) -> Result<HandlerOutcome, HandlerError> {
        let Some(id) = actionable_identifier(message.identifier) else {
            debug!("Reindex message without identifier, ignoring");
            return Ok(HandlerOutcome::Skipped);
        };

        let indexer = resolve(&self.factory, &message.classname, id)?;
        indexer.index(id, ExecutionMode::BestEffort).await?;
        Ok(HandlerOutcome::Dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{factory_with, RecordingIndexer};
    use solr_indexer_shared::ContentKind;

    #[tokio::test]
    async fn test_dispatches_to_index() {
        let tags = RecordingIndexer::new(ContentKind::Tag);
        let handler = ReindexHandler::new(factory_with(tags.clone()));

        let outcome = handler
            .handle(&ReindexMessage::new(ContentKind::Tag, 5))
            .await
            .unwrap();

        assert_eq!(outcome, HandlerOutcome::Dispatched);
        assert_eq!(tags.calls(), vec![("index", 5, ExecutionMode::BestEffort)]);
    }

    #[tokio::test]
    async fn test_missing_or_zero_identifier_is_skipped() {
        let tags = RecordingIndexer::new(ContentKind::Tag);
        let handler = ReindexHandler::new(factory_with(tags.clone()));

        for identifier in [None, Some(0)] {
            let message = ReindexMessage {
                classname: "Tag".to_string(),
                identifier,
            };
            assert_eq!(handler.handle(&message).await.unwrap(), HandlerOutcome::Skipped);
        }
        assert!(tags.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_class_is_configuration_error() {
        let handler = ReindexHandler::new(factory_with(RecordingIndexer::new(ContentKind::Tag)));
        let message = ReindexMessage {
            classname: "Comment".to_string(),
            identifier: Some(3),
        };

        let err = handler.handle(&message).await.unwrap_err();
        assert!(matches!(err, HandlerError::Configuration(_)));
    }
}
