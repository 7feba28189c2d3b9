//! Utility functions for building Solr queries.

use solr_indexer_shared::types::search_document::{DOCUMENT_TYPE_FIELD, ITEM_ID_FIELD};
use solr_indexer_shared::{ContentId, ContentKind};

/// Characters with a meaning in the Solr standard query parser.
const SPECIAL_CHARACTERS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/', ' ',
];

/// Escape a term so the standard query parser reads it literally.
///
/// # Example
///
/// ```
/// use solr_indexer_repository::utils::escape_query_term;
///
/// assert_eq!(escape_query_term("a:b c"), "a\\:b\\ c");
/// ```
pub fn escape_query_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query matching every document of one kind, or every document at all.
pub fn kind_query(kind: Option<ContentKind>) -> String {
    match kind {
        Some(kind) => format!(
            "{}:{}",
            DOCUMENT_TYPE_FIELD,
            escape_query_term(kind.class_name())
        ),
        None => "*:*".to_string(),
    }
}

/// Query matching every document derived from one content item, whatever
/// locales it was indexed under.
pub fn item_query(kind: ContentKind, id: ContentId) -> String {
    format!("{} AND {}:{}", kind_query(Some(kind)), ITEM_ID_FIELD, id)
}
