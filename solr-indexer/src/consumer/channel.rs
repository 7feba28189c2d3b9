//! In-process message channel feeding the orchestrator.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use crate::consumer::messages::{DeleteMessage, IndexMessage, ReindexMessage};
use crate::errors::IngestError;
use solr_indexer_shared::{ContentId, ContentKind};

/// Default capacity of the message channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// A stream of index messages. `None` means the stream has ended.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn next_message(&mut self) -> Option<IndexMessage>;
}

/// Receiving side of a bounded `mpsc` channel.
pub struct ChannelSource {
    receiver: mpsc::Receiver<IndexMessage>,
}

impl ChannelSource {
    /// Create a channel holding at most `capacity` pending messages.
    pub fn new(capacity: usize) -> (MessageSender, ChannelSource) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (MessageSender { sender }, ChannelSource { receiver })
    }
}

#[async_trait]
impl MessageSource for ChannelSource {
    async fn next_message(&mut self) -> Option<IndexMessage> {
        self.receiver.recv().await
    }
}

/// Sending side handed to producers. Cheap to clone; the stream ends once
/// every sender is dropped.
#[derive(Clone)]
pub struct MessageSender {
    sender: mpsc::Sender<IndexMessage>,
}

impl MessageSender {
    pub async fn send(&self, message: impl Into<IndexMessage>) -> Result<(), IngestError> {
        self.sender.send(message.into()).await.map_err(|e| {
            warn!(classname = e.0.classname(), "Message channel closed");
            IngestError::channel("Message channel closed")
        })
    }

    /// Queue a reindex of one item.
    pub async fn reindex(&self, kind: ContentKind, id: ContentId) -> Result<(), IngestError> {
        self.send(ReindexMessage::new(kind, id)).await
    }

    /// Queue a removal of one item.
    pub async fn delete(&self, kind: ContentKind, id: ContentId) -> Result<(), IngestError> {
        self.send(DeleteMessage::new(kind, id)).await
    }

    /// Decode a raw JSON payload and queue it.
    pub async fn send_json(&self, payload: &str) -> Result<(), IngestError> {
        self.send(IndexMessage::from_json(payload)?).await
    }
}
