//! Search document types for the Solr index.
//!
//! This module defines the document structure that is sent to the search engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::content::ContentId;
use crate::types::content_kind::ContentKind;

/// Name of the Solr unique key field.
pub const ID_FIELD: &str = "id";

/// Field holding the content kind class name, used by delete-by-kind queries.
pub const DOCUMENT_TYPE_FIELD: &str = "document_type_s";

/// Field holding the content item id.
pub const ITEM_ID_FIELD: &str = "item_id_i";

/// Field holding the document locale.
pub const LOCALE_FIELD: &str = "locale_s";

/// Engine-side representation of one leaf content item in one language.
///
/// `fields` always contains the unique key and the bookkeeping fields above;
/// mappers add their own fields on top.
///
/// # Example
///
/// ```
/// use solr_indexer_shared::{ContentKind, SearchDocument};
///
/// let doc = SearchDocument::new(ContentKind::Document, 7, Some("en"))
///     .with_field("name_txt", "Poster");
///
/// assert_eq!(doc.id, "document_7_en");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: String,
    pub kind: ContentKind,
    pub fields: Map<String, Value>,
}

impl SearchDocument {
    /// Create a document for a leaf item, pre-filled with the bookkeeping fields.
    pub fn new(kind: ContentKind, item_id: ContentId, locale: Option<&str>) -> Self {
        let id = Self::document_id(kind, item_id, locale);

        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), Value::from(id.clone()));
        fields.insert(
            DOCUMENT_TYPE_FIELD.to_string(),
            Value::from(kind.class_name()),
        );
        fields.insert(ITEM_ID_FIELD.to_string(), Value::from(item_id));
        if let Some(locale) = locale {
            fields.insert(LOCALE_FIELD.to_string(), Value::from(locale));
        }

        Self { id, kind, fields }
    }

    /// Generate the unique key used in the search index.
    ///
    /// The key is namespaced by kind so a document is never shared across kinds.
    /// Node sources are already single-language, so only documents that carry
    /// several translations need the locale suffix.
    pub fn document_id(kind: ContentKind, item_id: ContentId, locale: Option<&str>) -> String {
        let prefix = kind.class_name().to_lowercase();
        match locale {
            Some(locale) if kind != ContentKind::NodeSource => {
                format!("{}_{}_{}", prefix, item_id, locale)
            }
            _ => format!("{}_{}", prefix, item_id),
        }
    }

    /// Set a field, skipping the write when the value is null.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.fields.insert(key.into(), value);
        }
        self
    }
}
