//! Orchestrator module for the indexer.
//!
//! Pulls index messages from a source and routes them to the handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::consumer::{IndexMessage, MessageSource};
use crate::errors::{HandlerError, IngestError};
use crate::handlers::{DeleteHandler, HandlerOutcome, ReindexHandler};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Interval between progress log lines.
    pub progress_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_secs(10),
        }
    }
}

/// Message counters since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorStats {
    /// Messages dispatched to an indexer.
    pub handled: u64,
    /// Messages without a usable identifier.
    pub skipped: u64,
    /// Messages dropped after a handler error.
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    handled: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> OrchestratorStats {
        OrchestratorStats {
            handled: self.handled.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Orchestrator that drives the message handlers.
///
/// Messages are handled one at a time, in arrival order. A failed message is
/// logged and dropped; nothing is retried. The loop ends when the source is
/// exhausted, on `ctrl_c` or after [`Orchestrator::shutdown`].
pub struct Orchestrator {
    source: Box<dyn MessageSource>,
    reindex_handler: ReindexHandler,
    delete_handler: DeleteHandler,
    config: OrchestratorConfig,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
    counters: Arc<Counters>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        source: Box<dyn MessageSource>,
        reindex_handler: ReindexHandler,
        delete_handler: DeleteHandler,
    ) -> Self {
        Self::with_config(
            source,
            reindex_handler,
            delete_handler,
            OrchestratorConfig::default(),
        )
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        source: Box<dyn MessageSource>,
        reindex_handler: ReindexHandler,
        delete_handler: DeleteHandler,
        config: OrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            source,
            reindex_handler,
            delete_handler,
            config,
            shutdown_tx,
            shutdown_rx,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Run until the source ends or a shutdown is requested.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<OrchestratorStats, IngestError> {
        info!("Starting indexer orchestrator");

        let mut progress_timer = interval(self.config.progress_interval);
        progress_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut prev_handled: u64 = 0;
        let mut prev_time = std::time::Instant::now();

        loop {
            tokio::select! {
                msg = self.source.next_message() => {
                    match msg {
                        Some(message) => self.dispatch(message).await,
                        None => {
                            info!("Message stream ended");
                            break;
                        }
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown requested");
                    break;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    let _ = self.shutdown_tx.send(());
                    break;
                }
                _ = progress_timer.tick() => {
                    let stats = self.counters.snapshot();

                    let now = std::time::Instant::now();
                    let elapsed_secs = now.duration_since(prev_time).as_secs_f64();
                    let handled_per_sec = if elapsed_secs > 0.0 {
                        (stats.handled.saturating_sub(prev_handled) as f64) / elapsed_secs
                    } else {
                        0.0
                    };

                    info!(
                        messages_handled = stats.handled,
                        messages_skipped = stats.skipped,
                        messages_failed = stats.failed,
                        messages_per_sec = format!("{:.2}", handled_per_sec),
                        "Processing progress"
                    );

                    prev_handled = stats.handled;
                    prev_time = now;
                }
            }
        }

        let stats = self.counters.snapshot();
        info!(
            messages_handled = stats.handled,
            messages_skipped = stats.skipped,
            messages_failed = stats.failed,
            "Orchestrator shutdown complete"
        );
        Ok(stats)
    }

    async fn dispatch(&self, message: IndexMessage) {
        let result = match &message {
            IndexMessage::Reindex(reindex) => self.reindex_handler.handle(reindex).await,
            IndexMessage::Delete(delete) => self.delete_handler.handle(delete).await,
        };

        match result {
            Ok(HandlerOutcome::Dispatched) => {
                self.counters.handled.fetch_add(1, Ordering::Relaxed);
            }
            Ok(HandlerOutcome::Skipped) => {
                self.counters.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Err(HandlerError::Configuration(_)) => {
                // Already logged by the handler.
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                debug!(classname = message.classname(), "Dropping unroutable message");
            }
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    classname = message.classname(),
                    identifier = ?message.identifier(),
                    error = %e,
                    "Failed to handle message, dropping it"
                );
            }
        }
    }

    /// Counters since startup.
    pub fn stats(&self) -> OrchestratorStats {
        self.counters.snapshot()
    }

    /// Trigger a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// A handle that can stop the orchestrator from another task.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}
