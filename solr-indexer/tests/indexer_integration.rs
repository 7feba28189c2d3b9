//! Integration tests for the indexers, wired the way the service wires them
//! but over in-memory content and a recording engine.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;

use common::{ErrorCounter, RecordingEngine, Store};
use solr_indexer::config::build_factory;
use solr_indexer::indexer::{LeafIndexer, ReindexSettings};
use solr_indexer::mapper::NodeSourceMapper;
use solr_indexer::{IndexerError, IndexerFactory, ReindexJob};
use solr_indexer_repository::UpdateOperation;
use solr_indexer_shared::{BatchDescriptor, ContentKind, ExecutionMode};

fn factory(store: &Store, engine: &Arc<RecordingEngine>) -> IndexerFactory {
    build_factory(&store.sources(), engine.clone(), ReindexSettings::default())
}

fn small_buffers() -> ReindexSettings {
    ReindexSettings {
        buffer_size: 3,
        page_size: 2,
    }
}

#[tokio::test]
async fn test_absent_item_makes_no_engine_call() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    for kind in ContentKind::ALL {
        let indexer = factory.indexer_for(kind).unwrap();
        for mode in [ExecutionMode::BestEffort, ExecutionMode::Strict] {
            indexer.index(9999, mode).await.unwrap();
            indexer.delete(9999, mode).await.unwrap();
        }
    }

    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn test_node_source_index_and_delete() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);
    let indexer = factory.indexer_for(ContentKind::NodeSource).unwrap();

    indexer.index(12, ExecutionMode::Strict).await.unwrap();
    indexer.delete(12, ExecutionMode::Strict).await.unwrap();

    let transactions = engine.transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].add_count(), 1);
    assert_eq!(transactions[0].commit_count(), 1);
    assert_eq!(
        engine.bodies()[1],
        r#"{"delete":{"query":"document_type_s:NodesSources AND item_id_i:12"},"commit":{}}"#
    );
}

#[tokio::test]
async fn test_unpublished_node_source_is_removed_on_index() {
    let store = Store::sample();
    let mut hidden = store.node_sources.remove(11).unwrap();
    hidden.published = false;
    store.node_sources.insert(hidden);

    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::NodeSource)
        .unwrap()
        .index(11, ExecutionMode::Strict)
        .await
        .unwrap();

    assert_eq!(
        engine.bodies(),
        vec![
            r#"{"delete":{"query":"document_type_s:NodesSources AND item_id_i:11"},"commit":{}}"#
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_node_with_three_variants_upserts_each_and_commits_once() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::Node)
        .unwrap()
        .index(1, ExecutionMode::Strict)
        .await
        .unwrap();

    let transactions = engine.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].add_count(), 3);
    assert_eq!(transactions[0].commit_count(), 1);
    assert_eq!(
        engine.added_ids(),
        vec!["nodessources_11", "nodessources_12", "nodessources_13"]
    );
}

#[tokio::test]
async fn test_node_delete_removes_every_variant() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::Node)
        .unwrap()
        .delete(1, ExecutionMode::Strict)
        .await
        .unwrap();

    let transactions = engine.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].delete_count(), 3);
    assert_eq!(transactions[0].add_count(), 0);
    assert_eq!(transactions[0].commit_count(), 1);
}

#[tokio::test]
async fn test_tag_index_and_delete_stage_identical_requests() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);
    let tags = factory.indexer_for(ContentKind::Tag).unwrap();

    tags.index(100, ExecutionMode::BestEffort).await.unwrap();
    tags.delete(100, ExecutionMode::BestEffort).await.unwrap();

    let bodies = engine.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);

    let transaction = &engine.transactions()[0];
    assert_eq!(transaction.add_count(), 4);
    let tail: Vec<_> = transaction.operations().iter().rev().take(2).cloned().collect();
    assert_eq!(tail, vec![UpdateOperation::Commit, UpdateOperation::Optimize]);
}

#[tokio::test]
async fn test_strict_tag_delete_rejects_stale_association() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    let err = factory
        .indexer_for(ContentKind::Tag)
        .unwrap()
        .delete(100, ExecutionMode::Strict)
        .await
        .unwrap_err();

    match err {
        IndexerError::StaleAssociation {
            kind,
            id,
            dependents,
        } => {
            assert_eq!(kind, ContentKind::Tag);
            assert_eq!(id, 100);
            assert_eq!(dependents, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(engine.call_count(), 0);
}

/// Detach tag 100 the way the host does before deleting it: nodes stop
/// listing it and their node sources drop the name, while the tag still lists
/// its former nodes so the cascade knows what to recompute.
fn detach_news_tag(store: &Store) {
    for node_id in [1, 2] {
        let mut node = store.nodes.remove(node_id).unwrap();
        node.tags.clear();
        for source_id in &node.node_sources {
            let mut source = store.node_sources.remove(*source_id).unwrap();
            source.tag_names.clear();
            store.node_sources.insert(source);
        }
        store.nodes.insert(node);
    }
}

#[tokio::test]
async fn test_strict_tag_delete_after_detach_reconciles() {
    let store = Store::sample();
    detach_news_tag(&store);
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::Tag)
        .unwrap()
        .delete(100, ExecutionMode::Strict)
        .await
        .unwrap();

    let transaction = &engine.transactions()[0];
    assert_eq!(transaction.add_count(), 4);
    for op in transaction.operations() {
        if let UpdateOperation::Add(doc) = op {
            assert!(!doc.fields.contains_key("tags_txt"), "{} kept its tag", doc.id);
        }
    }
}

#[tokio::test]
async fn test_tag_rename_recomputes_tag_field() {
    let store = Store::sample();
    for source_id in [11, 12, 13, 21] {
        let mut source = store.node_sources.remove(source_id).unwrap();
        source.tag_names = vec!["headlines".to_string()];
        store.node_sources.insert(source);
    }
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::Tag)
        .unwrap()
        .index(100, ExecutionMode::Strict)
        .await
        .unwrap();

    let tags: Vec<_> = engine.transactions()[0]
        .operations()
        .iter()
        .filter_map(|op| match op {
            UpdateOperation::Add(doc) => Some(doc.fields["tags_txt"].clone()),
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec![serde_json::json!(["headlines"]); 4]);
}

#[tokio::test]
async fn test_folder_reindexes_every_translation() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);
    let folders = factory.indexer_for(ContentKind::Folder).unwrap();

    folders.index(200, ExecutionMode::Strict).await.unwrap();

    assert_eq!(
        engine.added_ids(),
        vec!["document_300_en", "document_300_fr", "document_301"]
    );
    let transaction = &engine.transactions()[0];
    assert_eq!(transaction.commit_count(), 1);
    assert!(transaction.operations().contains(&UpdateOperation::Optimize));

    engine.clear();
    folders.delete(200, ExecutionMode::BestEffort).await.unwrap();
    assert_eq!(engine.added_ids().len(), 3);
}

#[tokio::test]
async fn test_dropped_translation_is_removed() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);
    let documents = factory.indexer_for(ContentKind::Document).unwrap();

    documents.index(300, ExecutionMode::Strict).await.unwrap();
    assert_eq!(engine.added_ids(), vec!["document_300_en", "document_300_fr"]);

    let mut poster = store.documents.remove(300).unwrap();
    poster.translations.retain(|t| t.locale == "en");
    store.documents.insert(poster);
    engine.clear();

    documents.index(300, ExecutionMode::Strict).await.unwrap();
    documents.delete(300, ExecutionMode::Strict).await.unwrap();

    let operations = engine.transactions()[0].operations().to_vec();
    assert_eq!(
        operations[0],
        UpdateOperation::DeleteByQuery("document_type_s:Document AND item_id_i:300".to_string())
    );
    assert_eq!(engine.added_ids(), vec!["document_300_en"]);
    assert_eq!(
        engine.bodies()[1],
        r#"{"delete":{"query":"document_type_s:Document AND item_id_i:300"},"commit":{}}"#
    );
}

#[test]
fn test_best_effort_failure_is_swallowed_and_logged_once() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    engine.fail_from_now();
    let factory = factory(&store, &engine);
    let indexer = factory.indexer_for(ContentKind::NodeSource).unwrap();

    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        indexer.index(11, ExecutionMode::BestEffort).await.unwrap();
    });
    assert_eq!(counter.count(), 1);

    let result = runtime.block_on(indexer.index(11, ExecutionMode::Strict));
    assert!(matches!(result, Err(IndexerError::Engine(_))));
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_cascading_kinds_do_not_reindex() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    for kind in [ContentKind::Node, ContentKind::Tag, ContentKind::Folder] {
        let err = factory
            .indexer_for(kind)
            .unwrap()
            .reindex_all(BatchDescriptor::single())
            .await
            .unwrap_err();
        assert!(matches!(err, IndexerError::Unsupported { .. }));
    }
}

#[tokio::test]
async fn test_batches_partition_the_corpus() {
    let store = Store::with_node_sources(10);
    let engine = RecordingEngine::new();
    let indexer = LeafIndexer::node_sources(
        store.node_sources.clone(),
        Arc::new(NodeSourceMapper),
        engine.clone(),
    )
    .with_settings(small_buffers());

    let mut windows = Vec::new();
    let mut seen = Vec::new();
    for number in 0..3 {
        engine.clear();
        let summary = indexer
            .reindex(BatchDescriptor::new(3, number).unwrap())
            .await
            .unwrap();
        windows.push((summary.offset, summary.limit));
        assert_eq!(summary.total, 10);
        seen.extend(engine.added_ids());
    }

    assert_eq!(windows, vec![(0, 4), (4, 4), (8, 2)]);
    let unique: BTreeSet<_> = seen.iter().cloned().collect();
    assert_eq!(seen.len(), 10);
    assert_eq!(unique.len(), 10);
    assert_eq!(store.node_sources.detached(), 10);
}

#[tokio::test]
async fn test_single_batch_indexes_everything_once() {
    let store = Store::with_node_sources(7);
    let engine = RecordingEngine::new();
    let indexer = LeafIndexer::node_sources(
        store.node_sources.clone(),
        Arc::new(NodeSourceMapper),
        engine.clone(),
    )
    .with_settings(small_buffers());

    let summary = indexer.reindex(BatchDescriptor::single()).await.unwrap();

    assert_eq!(summary.items, 7);
    assert_eq!(summary.documents, 7);
    // 3 + 3 + 1 documents, then optimize and commit.
    assert_eq!(summary.flushes, 3);
    let transactions = engine.transactions();
    assert_eq!(transactions.len(), 5);
    assert_eq!(
        transactions[3].operations().to_vec(),
        vec![UpdateOperation::Optimize]
    );
    assert_eq!(
        transactions[4].operations().to_vec(),
        vec![UpdateOperation::Commit]
    );
    assert_eq!(
        store.node_sources.slice_calls(),
        vec![(0, 2), (2, 2), (4, 2), (6, 1)]
    );
}

#[tokio::test]
async fn test_reindex_job_empties_first_for_single_batch() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = Arc::new(factory(&store, &engine));

    let summaries = ReindexJob::new(factory, BatchDescriptor::single())
        .with_empty_first(true)
        .run()
        .await
        .unwrap();

    let kinds: Vec<_> = summaries.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ContentKind::NodeSource, ContentKind::Document]);
    assert_eq!(summaries[0].documents, 4);
    assert_eq!(summaries[1].documents, 3);

    let bodies = engine.bodies();
    assert_eq!(
        bodies[0],
        r#"{"delete":{"query":"document_type_s:NodesSources"},"commit":{}}"#
    );
}

#[tokio::test]
async fn test_reindex_job_refuses_to_empty_from_a_shard() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = Arc::new(factory(&store, &engine));

    let err = ReindexJob::new(factory, BatchDescriptor::new(2, 0).unwrap())
        .with_empty_first(true)
        .run()
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn test_empty_without_filter_clears_everything() {
    let store = Store::sample();
    let engine = RecordingEngine::new();
    let factory = factory(&store, &engine);

    factory
        .indexer_for(ContentKind::Tag)
        .unwrap()
        .empty(None)
        .await
        .unwrap();

    assert_eq!(
        engine.bodies(),
        vec![r#"{"delete":{"query":"*:*"},"commit":{}}"#.to_string()]
    );
}
