//! Media document mapper.

use solr_indexer_shared::{ContentKind, Document, SearchDocument};

use crate::errors::MappingError;
use crate::mapper::DocumentMapper;

/// Maps a media document to one search document per translation.
///
/// A document without translations is still searchable by filename through a
/// single locale-less document.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssetMapper;

impl DocumentAssetMapper {
    fn base_document(item: &Document, locale: Option<&str>) -> SearchDocument {
        SearchDocument::new(ContentKind::Document, item.id, locale)
            .with_field("filename_s", item.filename.clone())
            .with_field("mime_type_s", item.mime_type.clone())
            .with_field("folders_i", item.folders.clone())
    }
}

impl DocumentMapper<Document> for DocumentAssetMapper {
    fn map(&self, item: &Document) -> Result<Vec<SearchDocument>, MappingError> {
        if item.filename.is_empty() {
            return Err(MappingError::new(
                ContentKind::Document,
                item.id,
                "missing filename",
            ));
        }

        if item.translations.is_empty() {
            return Ok(vec![Self::base_document(item, None)]);
        }

        Ok(item
            .translations
            .iter()
            .map(|translation| {
                Self::base_document(item, Some(&translation.locale))
                    .with_field("name_txt", translation.name.clone())
                    .with_field("description_txt", translation.description.clone())
            })
            .collect())
    }

    fn has_variable_documents(&self) -> bool {
        true
    }
}
