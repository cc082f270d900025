//! # Swap Indexer
//!
//! Reads ledger events as NDJSON (a file via `SI_EVENTS_FILE`, or stdin),
//! detects router swaps, and maintains account, asset and daily aggregates.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging, optional OTLP export, metrics)
//! 2. Load configuration from `SI_*` environment variables
//! 3. Run the pipeline until end of input or Ctrl+C

use anyhow::{Context, Result};
use tracing::{error, info};

use indexer_runtime::container::IndexerConfig;
use indexer_runtime::IndexerRuntime;
use indexer_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .await
        .context("Failed to initialize telemetry")?;

    let config = IndexerConfig::from_env().context("Invalid configuration")?;
    let runtime = IndexerRuntime::new(config);
    info!(run_id = %runtime.run_id(), "Swap indexer starting");

    let shutdown = runtime.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received");
                let _ = shutdown.send(true);
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let stats = runtime.run().await?;
    info!(
        events = stats.events,
        swaps = stats.swaps,
        reorgs = stats.reorgs,
        pending = stats.pending,
        "Swap indexer stopped"
    );
    Ok(())
}
