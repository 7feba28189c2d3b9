//! Dependency initialization and wiring for the indexer.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{ConnectionMode, IndexerConfig};
use crate::consumer::{ChannelSource, MessageSender};
use crate::factory::IndexerFactory;
use crate::handlers::{DeleteHandler, ReindexHandler};
use crate::indexer::{FolderIndexer, LeafIndexer, NodeIndexer, ReindexSettings, TagIndexer};
use crate::mapper::{DocumentAssetMapper, NodeSourceMapper};
use crate::orchestrator::Orchestrator;
use crate::IndexingError;
use solr_indexer_repository::{ContentSource, SearchEngineClient, SolrClient, SolrConfig};
use solr_indexer_shared::{Document, Folder, Node, NodeSource, Tag};

/// Read access to every content kind, provided by the host application.
#[derive(Clone)]
pub struct ContentSources {
    pub node_sources: Arc<dyn ContentSource<NodeSource>>,
    pub nodes: Arc<dyn ContentSource<Node>>,
    pub tags: Arc<dyn ContentSource<Tag>>,
    pub folders: Arc<dyn ContentSource<Folder>>,
    pub documents: Arc<dyn ContentSource<Document>>,
}

/// Build the five indexers over one engine and register them.
pub fn build_factory(
    sources: &ContentSources,
    engine: Arc<dyn SearchEngineClient>,
    settings: ReindexSettings,
) -> IndexerFactory {
    let node_sources = Arc::new(
        LeafIndexer::node_sources(
            sources.node_sources.clone(),
            Arc::new(NodeSourceMapper),
            engine.clone(),
        )
        .with_settings(settings),
    );
    let documents = Arc::new(
        LeafIndexer::documents(
            sources.documents.clone(),
            Arc::new(DocumentAssetMapper),
            engine,
        )
        .with_settings(settings),
    );

    let nodes = NodeIndexer::new(sources.nodes.clone(), node_sources.clone());
    let tags = TagIndexer::new(
        sources.tags.clone(),
        sources.nodes.clone(),
        node_sources.clone(),
    );
    let folders = FolderIndexer::new(
        sources.folders.clone(),
        sources.documents.clone(),
        documents.clone(),
    );

    IndexerFactory::builder()
        .register(node_sources)
        .register(documents)
        .register(Arc::new(nodes))
        .register(Arc::new(tags))
        .register(Arc::new(folders))
        .build()
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Registry of every indexer, shared with the handlers.
    pub factory: Arc<IndexerFactory>,
    /// Producer side of the message channel.
    pub sender: MessageSender,
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`IndexerConfig::from_env`] for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If Solr is unreachable in fail-fast mode, or rejects the ping
    pub async fn new(sources: ContentSources) -> Result<Self, IndexingError> {
        Self::with_config(sources, IndexerConfig::from_env()).await
    }

    /// Initialize all dependencies from an explicit configuration.
    pub async fn with_config(
        sources: ContentSources,
        config: IndexerConfig,
    ) -> Result<Self, IndexingError> {
        info!(
            solr_url = %config.solr.url,
            solr_core = %config.solr.core,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let engine = Self::connect_to_solr(
            &config.solr,
            config.connection_mode,
            config.retry_interval,
        )
        .await?;

        info!("Solr connection established");

        Ok(Self::with_engine(sources, Arc::new(engine), &config))
    }

    /// Wire everything around an already connected engine.
    pub fn with_engine(
        sources: ContentSources,
        engine: Arc<dyn SearchEngineClient>,
        config: &IndexerConfig,
    ) -> Self {
        let factory = Arc::new(build_factory(&sources, engine, config.reindex));

        let (sender, source) = ChannelSource::new(config.channel_capacity);
        let orchestrator = Orchestrator::new(
            Box::new(source),
            ReindexHandler::new(factory.clone()),
            DeleteHandler::new(factory.clone()),
        );

        Self {
            factory,
            sender,
            orchestrator,
        }
    }

    /// Connect to Solr with retry logic based on connection mode.
    async fn connect_to_solr(
        config: &SolrConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<SolrClient, IndexingError> {
        let client = SolrClient::new(config.clone())
            .map_err(|e| IndexingError::config(format!("Invalid Solr configuration: {}", e)))?;

        loop {
            match client.ping().await {
                Ok(()) => return Ok(client),
                // Retry only while the server is unreachable or overloaded.
                Err(e) if mode == ConnectionMode::FailFast || !e.is_unavailable() => {
                    return Err(IndexingError::config(format!(
                        "Failed to connect to Solr: {}",
                        e
                    )));
                }
                Err(e) => {
                    warn!(
                        solr_url = %config.url,
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "Failed to connect to Solr, retrying..."
                    );
                    sleep(retry_interval).await;
                }
            }
        }
    }
}
