//! Tracing initialization.

use std::env;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::IndexingError;

const DEFAULT_FILTER: &str = "solr_indexer=info,solr_indexer_repository=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. With `LOG_FORMAT=json` events are
/// written as JSON lines for log shippers, otherwise as pretty console output.
pub fn init_tracing() -> Result<(), IndexingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| IndexingError::config(format!("Failed to install tracing: {}", e)))?;

        info!(
            service_name = "solr-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| IndexingError::config(format!("Failed to install tracing: {}", e)))?;

        info!(
            service_name = "solr-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}
