//! Configuration types for the Solr client.

use std::time::Duration;

/// Default Solr base URL (the `/solr` servlet root).
pub const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr";

/// Default Solr core (or collection) name.
pub const DEFAULT_SOLR_CORE: &str = "content";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a Solr core.
///
/// Network-level timeouts live here; indexers never model their own.
#[derive(Debug, Clone)]
pub struct SolrConfig {
    /// Base URL of the Solr servlet, e.g. `http://localhost:8983/solr`.
    pub url: String,
    /// Core or collection receiving the documents.
    pub core: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOLR_URL.to_string(),
            core: DEFAULT_SOLR_CORE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SolrConfig {
    /// Create a config for `core` on the server at `url`.
    pub fn new(url: impl Into<String>, core: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            core: core.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
