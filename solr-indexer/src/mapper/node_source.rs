//! Node source mapper.

use solr_indexer_shared::{ContentKind, NodeSource, SearchDocument};

use crate::errors::MappingError;
use crate::mapper::DocumentMapper;

/// Maps a node source to one document in its locale.
///
/// Unpublished node sources map to no document, so upserting one clears it
/// from the index. Custom fields are copied as-is but never override the
/// bookkeeping fields.
#[derive(Debug, Clone, Default)]
pub struct NodeSourceMapper;

impl DocumentMapper<NodeSource> for NodeSourceMapper {
    fn map(&self, item: &NodeSource) -> Result<Vec<SearchDocument>, MappingError> {
        if item.locale.trim().is_empty() {
            return Err(MappingError::new(
                ContentKind::NodeSource,
                item.id,
                "missing locale",
            ));
        }

        if !item.published {
            return Ok(Vec::new());
        }

        let mut doc = SearchDocument::new(ContentKind::NodeSource, item.id, Some(&item.locale))
            .with_field("node_id_i", item.node_id)
            .with_field("title_txt", item.title.clone())
            .with_field("published_b", item.published);

        if !item.tag_names.is_empty() {
            doc = doc.with_field("tags_txt", item.tag_names.clone());
        }

        for (key, value) in &item.fields {
            if !doc.fields.contains_key(key) {
                doc.fields.insert(key.clone(), value.clone());
            }
        }

        Ok(vec![doc])
    }
}
