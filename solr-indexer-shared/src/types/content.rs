//! Read-only snapshots of content items handed out by a content source.
//!
//! Relationships are carried as id lists so cascading indexers can walk from a
//! node, tag or folder down to the leaf items that live in the index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store identifier of a content item. `0` never identifies a stored item.
pub type ContentId = u64;

/// Anything the content store hands out under a store id.
pub trait ContentItem {
    fn content_id(&self) -> ContentId;
}

macro_rules! impl_content_item {
    ($($ty:ty),*) => {
        $(impl ContentItem for $ty {
            fn content_id(&self) -> ContentId {
                self.id
            }
        })*
    };
}

impl_content_item!(NodeSource, Node, Tag, Folder, Document);

/// A node's content in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSource {
    pub id: ContentId,
    pub node_id: ContentId,
    pub locale: String,
    pub title: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    /// Indexable custom fields, passed through to the search document.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Names of the tags attached to the parent node.
    #[serde(default)]
    pub tag_names: Vec<String>,
}

fn default_published() -> bool {
    true
}

/// A structural node, parent of its per-language node sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: ContentId,
    #[serde(default)]
    pub node_sources: Vec<ContentId>,
    #[serde(default)]
    pub tags: Vec<ContentId>,
}

/// A tag attached to nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<ContentId>,
}

/// A folder grouping media documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub documents: Vec<ContentId>,
}

/// A media asset with its per-language translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: ContentId,
    pub filename: String,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub folders: Vec<ContentId>,
    #[serde(default)]
    pub translations: Vec<DocumentTranslation>,
}

/// One language variant of a media asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTranslation {
    pub locale: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NodeSource {
    /// Create a published node source without custom fields.
    pub fn new(id: ContentId, node_id: ContentId, locale: impl Into<String>) -> Self {
        Self {
            id,
            node_id,
            locale: locale.into(),
            title: None,
            published: true,
            fields: Map::new(),
            tag_names: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Document {
    /// Create a document without translations or folders.
    pub fn new(id: ContentId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            mime_type: None,
            folders: Vec::new(),
            translations: Vec::new(),
        }
    }

    pub fn with_translation(mut self, locale: impl Into<String>, name: Option<&str>) -> Self {
        self.translations.push(DocumentTranslation {
            locale: locale.into(),
            name: name.map(str::to_string),
            description: None,
        });
        self
    }
}
