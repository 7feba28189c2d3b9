//! Environment-driven settings for the indexer.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenv::dotenv;
use tracing::warn;

use crate::consumer::DEFAULT_CHANNEL_CAPACITY;
use crate::indexer::ReindexSettings;
use solr_indexer_repository::config::{DEFAULT_SOLR_CORE, DEFAULT_SOLR_URL, DEFAULT_TIMEOUT_SECS};
use solr_indexer_repository::{SolrConfig, DEFAULT_BUFFER_SIZE, DEFAULT_PAGE_SIZE};

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for Solr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Fail immediately if the first ping fails.
    FailFast,
    /// Ping again every retry interval until successful.
    #[default]
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Anything else falls back to "retry".
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!(value = value, "Invalid SOLR_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Everything the indexer reads from its environment.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub solr: SolrConfig,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub reindex: ReindexSettings,
    pub channel_capacity: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            solr: SolrConfig::default(),
            connection_mode: ConnectionMode::default(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
            reindex: ReindexSettings::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl IndexerConfig {
    /// Read the configuration from the environment, loading `.env` first.
    ///
    /// # Environment Variables
    ///
    /// - `SOLR_URL`: Solr base URL (default: http://localhost:8983/solr)
    /// - `SOLR_CORE`: Core receiving the documents (default: content)
    /// - `SOLR_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `SOLR_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `SOLR_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `INDEXER_BUFFER_SIZE`: Documents per bulk flush (default: 100)
    /// - `INDEXER_PAGE_SIZE`: Items per content source page (default: 100)
    /// - `INDEXER_CHANNEL_CAPACITY`: Pending messages (default: 1000)
    ///
    /// Unparseable numbers fall back to their default.
    pub fn from_env() -> Self {
        dotenv().ok();

        let url = env::var("SOLR_URL").unwrap_or_else(|_| DEFAULT_SOLR_URL.to_string());
        let core = env::var("SOLR_CORE").unwrap_or_else(|_| DEFAULT_SOLR_CORE.to_string());
        let timeout = Duration::from_secs(parse_var("SOLR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));
        let connection_mode = env::var("SOLR_CONNECTION_MODE")
            .map(|value| ConnectionMode::parse(&value))
            .unwrap_or_default();

        Self {
            solr: SolrConfig::new(url, core).with_timeout(timeout),
            connection_mode,
            retry_interval: Duration::from_secs(parse_var(
                "SOLR_RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )),
            reindex: ReindexSettings {
                buffer_size: parse_var("INDEXER_BUFFER_SIZE", DEFAULT_BUFFER_SIZE),
                page_size: parse_var("INDEXER_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            },
            channel_capacity: parse_var("INDEXER_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(name = name, value = %raw, "Invalid numeric setting, using default");
            default
        }),
        Err(_) => default,
    }
}
