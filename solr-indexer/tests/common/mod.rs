//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use solr_indexer::ContentSources;
use solr_indexer_repository::{
    InMemoryContentSource, SearchEngineClient, SearchIndexError, UpdateOperation,
    UpdateTransaction,
};
use solr_indexer_shared::{Document, Folder, Node, NodeSource, Tag};

/// Engine recording every transaction it receives.
#[derive(Default)]
pub struct RecordingEngine {
    transactions: Mutex<Vec<UpdateTransaction>>,
    fail: AtomicBool,
}

impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail.
    pub fn fail_from_now(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn transactions(&self) -> Vec<UpdateTransaction> {
        self.transactions.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.transactions()
            .iter()
            .map(|tx| tx.to_json_body().unwrap())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }

    /// Ids of every document added, in order.
    pub fn added_ids(&self) -> Vec<String> {
        self.transactions()
            .iter()
            .flat_map(|tx| tx.operations().to_vec())
            .filter_map(|op| match op {
                UpdateOperation::Add(doc) => Some(doc.id),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.transactions.lock().unwrap().clear();
    }
}

#[async_trait]
impl SearchEngineClient for RecordingEngine {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn execute(&self, transaction: &UpdateTransaction) -> Result<(), SearchIndexError> {
        if transaction.is_empty() {
            return Ok(());
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchIndexError::connection("forced failure"));
        }
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }
}

/// In-memory content store.
pub struct Store {
    pub node_sources: Arc<InMemoryContentSource<NodeSource>>,
    pub nodes: Arc<InMemoryContentSource<Node>>,
    pub tags: Arc<InMemoryContentSource<Tag>>,
    pub folders: Arc<InMemoryContentSource<Folder>>,
    pub documents: Arc<InMemoryContentSource<Document>>,
}

impl Store {
    pub fn empty() -> Self {
        Self {
            node_sources: Arc::new(InMemoryContentSource::new()),
            nodes: Arc::new(InMemoryContentSource::new()),
            tags: Arc::new(InMemoryContentSource::new()),
            folders: Arc::new(InMemoryContentSource::new()),
            documents: Arc::new(InMemoryContentSource::new()),
        }
    }

    /// A small site:
    ///
    /// - node 1 in en/fr/de (node sources 11, 12, 13), node 2 in en (21),
    ///   both tagged with tag 100 "news"
    /// - folder 200 holding document 300 (en, fr) and document 301 (no
    ///   translation)
    pub fn sample() -> Self {
        let store = Self::empty();

        for (id, node_id, locale) in [(11, 1, "en"), (12, 1, "fr"), (13, 1, "de"), (21, 2, "en")] {
            let mut source = NodeSource::new(id, node_id, locale).with_title(format!("Page {}", id));
            source.tag_names = vec!["news".to_string()];
            store.node_sources.insert(source);
        }
        store.nodes.insert(Node {
            id: 1,
            node_sources: vec![11, 12, 13],
            tags: vec![100],
        });
        store.nodes.insert(Node {
            id: 2,
            node_sources: vec![21],
            tags: vec![100],
        });
        store.tags.insert(Tag {
            id: 100,
            name: "news".to_string(),
            nodes: vec![1, 2],
        });

        let mut poster = Document::new(300, "poster.pdf")
            .with_translation("en", Some("Poster"))
            .with_translation("fr", Some("Affiche"));
        poster.folders = vec![200];
        let mut logo = Document::new(301, "logo.svg");
        logo.folders = vec![200];
        store.documents.insert(poster);
        store.documents.insert(logo);
        store.folders.insert(Folder {
            id: 200,
            name: "Press".to_string(),
            documents: vec![300, 301],
        });

        store
    }

    /// `count` published node sources with ids `1..=count`, on node `1000`.
    pub fn with_node_sources(count: u64) -> Self {
        let store = Self::empty();
        for id in 1..=count {
            store.node_sources.insert(NodeSource::new(id, 1000, "en"));
        }
        store
    }

    pub fn sources(&self) -> ContentSources {
        ContentSources {
            node_sources: self.node_sources.clone(),
            nodes: self.nodes.clone(),
            tags: self.tags.clone(),
            folders: self.folders.clone(),
            documents: self.documents.clone(),
        }
    }
}

/// Layer counting `ERROR` events.
#[derive(Clone, Default)]
pub struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
