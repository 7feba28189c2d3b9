//! Message types for the consumer.
//!
//! Producers emit a message whenever content is saved or removed. Identifiers
//! arrive as numbers, numeric strings, empty strings or `null`; anything that
//! does not name a real item becomes `None` and is ignored downstream.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::IngestError;
use solr_indexer_shared::{ContentId, ContentKind};

/// Request to (re)index one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexMessage {
    pub classname: String,
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub identifier: Option<ContentId>,
}

/// Request to remove one content item from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMessage {
    pub classname: String,
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub identifier: Option<ContentId>,
}

impl ReindexMessage {
    pub fn new(kind: ContentKind, identifier: ContentId) -> Self {
        Self {
            classname: kind.class_name().to_string(),
            identifier: Some(identifier),
        }
    }
}

impl DeleteMessage {
    pub fn new(kind: ContentKind, identifier: ContentId) -> Self {
        Self {
            classname: kind.class_name().to_string(),
            identifier: Some(identifier),
        }
    }
}

/// Envelope for everything flowing through the message channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndexMessage {
    Reindex(ReindexMessage),
    Delete(DeleteMessage),
}

impl IndexMessage {
    /// Decode a JSON message such as
    /// `{"type":"reindex","classname":"Tag","identifier":"42"}`.
    pub fn from_json(payload: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn classname(&self) -> &str {
        match self {
            IndexMessage::Reindex(message) => &message.classname,
            IndexMessage::Delete(message) => &message.classname,
        }
    }

    pub fn identifier(&self) -> Option<ContentId> {
        match self {
            IndexMessage::Reindex(message) => message.identifier,
            IndexMessage::Delete(message) => message.identifier,
        }
    }
}

impl From<ReindexMessage> for IndexMessage {
    fn from(message: ReindexMessage) -> Self {
        IndexMessage::Reindex(message)
    }
}

impl From<DeleteMessage> for IndexMessage {
    fn from(message: DeleteMessage) -> Self {
        IndexMessage::Delete(message)
    }
}

fn lenient_identifier<'de, D>(deserializer: D) -> Result<Option<ContentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
