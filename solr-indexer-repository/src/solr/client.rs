//! Solr client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using Solr's JSON update handler over `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SolrConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchEngineClient;
use crate::transaction::UpdateTransaction;

/// Solr client implementation.
///
/// Sends every transaction as one JSON update request to the configured core.
///
/// # Example
///
/// ```ignore
/// use solr_indexer_repository::{SolrClient, SolrConfig, UpdateTransaction};
///
/// let client = SolrClient::new(SolrConfig::new("http://localhost:8983/solr", "content"))?;
/// client.ping().await?;
///
/// let mut tx = UpdateTransaction::new();
/// tx.delete_by_query("*:*").commit();
/// client.execute(&tx).await?;
/// ```
pub struct SolrClient {
    http: Client,
    update_url: Url,
    ping_url: Url,
    config: SolrConfig,
}

impl SolrClient {
    /// Create a new Solr client for the configured core.
    ///
    /// No request is sent; call `ping` to check connectivity.
    ///
    /// # Returns
    ///
    /// * `Ok(SolrClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL or core is invalid or the HTTP client cannot be built
    pub fn new(config: SolrConfig) -> Result<Self, SearchIndexError> {
        let (update_url, ping_url) = Self::endpoints(&config)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            core = %config.core,
            timeout_secs = config.timeout.as_secs(),
            "Created Solr client"
        );

        Ok(Self {
            http,
            update_url,
            ping_url,
            config,
        })
    }

    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    /// Build the update and ping URLs of the core.
    fn endpoints(config: &SolrConfig) -> Result<(Url, Url), SearchIndexError> {
        let core = config.core.trim_matches('/');
        if core.is_empty() || core.contains('/') {
            return Err(SearchIndexError::validation(format!(
                "Invalid Solr core name '{}'",
                config.core
            )));
        }

        // A trailing slash keeps `join` from replacing the last path segment.
        let base = if config.url.ends_with('/') {
            config.url.clone()
        } else {
            format!("{}/", config.url)
        };
        let base = Url::parse(&base)
            .map_err(|e| SearchIndexError::validation(format!("Invalid Solr URL: {}", e)))?;

        let join = |path: &str| -> Result<Url, SearchIndexError> {
            let mut url = base
                .join(path)
                .map_err(|e| SearchIndexError::validation(format!("Invalid Solr URL: {}", e)))?;
            url.query_pairs_mut().append_pair("wt", "json");
            Ok(url)
        };

        Ok((
            join(&format!("{}/update", core))?,
            join(&format!("{}/admin/ping", core))?,
        ))
    }

    /// Turn a Solr response into a result.
    ///
    /// Solr reports failures both through the HTTP status and through
    /// `responseHeader.status`; both must be zero/success.
    async fn check_response(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<Value, SearchIndexError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, body = %body, operation = operation, "Solr request failed");
            return Err(SearchIndexError::request(status.as_u16(), body));
        }

        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| SearchIndexError::parse(format!("Invalid Solr response: {}", e)))?;

        let header_status = parsed
            .pointer("/responseHeader/status")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        if header_status != 0 {
            warn!(
                header_status = header_status,
                body = %body,
                operation = operation,
                "Solr reported a failed request"
            );
            return Err(SearchIndexError::request(status.as_u16(), body));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl SearchEngineClient for SolrClient {
    /// Ping the core through its admin ping handler.
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self.http.get(self.ping_url.clone()).send().await?;
        let parsed = Self::check_response(response, "ping").await?;

        match parsed.get("status").and_then(Value::as_str) {
            Some("OK") | None => {
                debug!(core = %self.config.core, "Solr ping succeeded");
                Ok(())
            }
            Some(other) => Err(SearchIndexError::connection(format!(
                "Solr core '{}' is not healthy: {}",
                self.config.core, other
            ))),
        }
    }

    /// Send the staged operations as one JSON update request.
    async fn execute(&self, transaction: &UpdateTransaction) -> Result<(), SearchIndexError> {
        if transaction.is_empty() {
            return Ok(());
        }

        let body = transaction.to_json_body()?;

        let response = self
            .http
            .post(self.update_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Self::check_response(response, "update").await?;

        debug!(
            operations = transaction.len(),
            adds = transaction.add_count(),
            deletes = transaction.delete_count(),
            "Solr update applied"
        );
        Ok(())
    }
}
