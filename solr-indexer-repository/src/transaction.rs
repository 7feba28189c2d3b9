//! Update transactions sent to the search engine.
//!
//! A transaction is an ordered list of staged operations rendered to Solr's
//! JSON update command syntax. Solr accepts repeated command keys in one
//! object, which keeps adds, deletes and directives in staging order.

use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use solr_indexer_shared::SearchDocument;

/// One staged operation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    /// Add or replace a document by unique key.
    Add(SearchDocument),
    /// Remove a document by unique key.
    DeleteById(String),
    /// Remove every document matching a query.
    DeleteByQuery(String),
    /// Make staged changes visible.
    Commit,
    /// Merge index segments.
    Optimize,
}

impl UpdateOperation {
    fn command(&self) -> (&'static str, Value) {
        match self {
            UpdateOperation::Add(doc) => ("add", json!({ "doc": doc.fields })),
            UpdateOperation::DeleteById(id) => ("delete", json!({ "id": id })),
            UpdateOperation::DeleteByQuery(query) => ("delete", json!({ "query": query })),
            UpdateOperation::Commit => ("commit", json!({})),
            UpdateOperation::Optimize => ("optimize", json!({ "waitSearcher": false })),
        }
    }
}

/// Ordered set of staged operations sent to the engine as one request.
///
/// # Example
///
/// ```
/// use solr_indexer_repository::UpdateTransaction;
///
/// let mut tx = UpdateTransaction::new();
/// tx.delete_by_id("nodessources_4").commit();
///
/// assert_eq!(
///     tx.to_json_body().unwrap(),
///     r#"{"delete":{"id":"nodessources_4"},"commit":{}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTransaction {
    operations: Vec<UpdateOperation>,
}

impl UpdateTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an upsert.
    pub fn add(&mut self, document: SearchDocument) -> &mut Self {
        self.operations.push(UpdateOperation::Add(document));
        self
    }

    /// Stage a removal by unique key.
    pub fn delete_by_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.operations.push(UpdateOperation::DeleteById(id.into()));
        self
    }

    /// Stage a removal by query.
    pub fn delete_by_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.operations.push(UpdateOperation::DeleteByQuery(query.into()));
        self
    }

    pub fn commit(&mut self) -> &mut Self {
        self.operations.push(UpdateOperation::Commit);
        self
    }

    pub fn optimize(&mut self) -> &mut Self {
        self.operations.push(UpdateOperation::Optimize);
        self
    }

    pub fn operations(&self) -> &[UpdateOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of staged adds.
    pub fn add_count(&self) -> usize {
        self.count(|op| matches!(op, UpdateOperation::Add(_)))
    }

    /// Number of staged deletes, by id or by query.
    pub fn delete_count(&self) -> usize {
        self.count(|op| {
            matches!(
                op,
                UpdateOperation::DeleteById(_) | UpdateOperation::DeleteByQuery(_)
            )
        })
    }

    /// Number of staged commits.
    pub fn commit_count(&self) -> usize {
        self.count(|op| matches!(op, UpdateOperation::Commit))
    }

    /// Returns true if the transaction only carries directives (commit/optimize).
    pub fn is_directive_only(&self) -> bool {
        self.add_count() == 0 && self.delete_count() == 0
    }

    fn count(&self, predicate: impl Fn(&UpdateOperation) -> bool) -> usize {
        self.operations.iter().filter(|op| predicate(op)).count()
    }

    /// Render the transaction as a Solr JSON update body.
    ///
    /// Rendering is deterministic: the same staged operations always produce
    /// the same bytes.
    pub fn to_json_body(&self) -> Result<String, SearchIndexError> {
        let mut commands = Vec::with_capacity(self.operations.len());
        for operation in &self.operations {
            let (name, payload) = operation.command();
            commands.push(format!("\"{}\":{}", name, serde_json::to_string(&payload)?));
        }
        Ok(format!("{{{}}}", commands.join(",")))
    }
}
