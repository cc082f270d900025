//! # Swap Indexer Runtime
//!
//! Wires the event source, the ingestion pipeline and the entity store.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and subsystem wiring
//! - `source` - NDJSON reader feeding a bounded channel
//! - `pipeline` - single sequential consumer
//!
//! ## Flow
//!
//! ```text
//! NDJSON ──→ source task ──mpsc(bounded)──→ pipeline ──→ LedgerEventDispatcher
//!                                                          │
//!                                         CorrelationEngine + AggregateRepository
//!                                                          │
//!                                                     EntityStore
//! ```
//!
//! The channel applies backpressure instead of dropping events, so the
//! source never runs further ahead than its capacity.

pub mod container;
pub mod pipeline;
pub mod source;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::container::{build_dispatcher, open_store, IndexerConfig};
use crate::pipeline::{Pipeline, PipelineStats};

/// The indexer runtime.
pub struct IndexerRuntime {
    config: IndexerConfig,
    run_id: Uuid,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl IndexerRuntime {
    pub fn new(config: IndexerConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            run_id: Uuid::new_v4(),
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Handle that stops the pipeline when `true` is sent.
    pub fn shutdown_handle(&self) -> watch::Sender<bool> {
        self.shutdown_tx.clone()
    }

    /// Run until the source is exhausted, shutdown is signalled, or an event
    /// fails.
    ///
    /// ## Startup Sequence
    ///
    /// 1. Open the entity store
    /// 2. Build the dispatcher
    /// 3. Spawn the source task
    /// 4. Consume on the current task
    pub async fn run(&self) -> Result<PipelineStats> {
        let span = info_span!("indexer", run_id = %self.run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<PipelineStats> {
        info!(
            backend = ?self.config.storage.backend,
            channel_capacity = self.config.source.channel_capacity,
            "Starting swap indexer"
        );

        let store = open_store(&self.config.storage)?;
        let dispatcher = build_dispatcher(&self.config, store)?;

        let (tx, rx) = mpsc::channel(self.config.source.channel_capacity);
        let events_file = self.config.source.events_file.clone();
        let source = tokio::spawn(
            async move { source::pump_from(events_file.as_deref(), tx).await }.in_current_span(),
        );

        let stats = Pipeline::new(dispatcher)
            .run(rx, self.shutdown_rx.clone())
            .await?;

        // The pipeline closing its receiver ends the source; a source error
        // means the input stopped short.
        match source.await.context("Event source task panicked")? {
            Ok(sent) => info!(sent, "Source complete"),
            Err(err) if *self.shutdown_rx.borrow() => {
                warn!(error = %err, "Source error after shutdown");
            }
            Err(err) => return Err(err).context("Event source failed"),
        }

        Ok(stats)
    }

    /// Signal the pipeline to stop after the current event.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if self.shutdown_tx.send(true).is_err() {
            warn!("Pipeline already stopped");
        }
    }
}
