//! # Indexer Telemetry
//!
//! Logging, trace export and metrics for the swap indexer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use indexer_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).await?;
//!     // spans and metrics are collected until the guard drops
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SI_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SI_JSON_LOGS` | `false` | JSON log lines |
//! | `SI_OTLP_ENABLED` | `false` | Export spans over OTLP |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | `http://localhost:4317` | OTLP endpoint |
//! | `OTEL_SERVICE_NAME` | `swap-indexer` | Service name in traces |

mod config;
mod metrics;
mod tracing_setup;

pub use config::{parse_flag, TelemetryConfig};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, EVENTS_PROCESSED, INGESTION_ERRORS,
    PENDING_EVICTED, PENDING_INPUTS, REGISTRY, STORE_COMMIT_DURATION, SWAPS_MATCHED,
    TRANSFERS_PROCESSED,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize OpenTelemetry tracer: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the application.
/// When dropped, it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active. Drop to flush and shutdown.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_without_exporter() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        // Another test binary may already own the global subscriber
        match init_telemetry(config).await {
            Ok(_guard) => {}
            Err(TelemetryError::TracerInit(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_filter_is_config_error() {
        let config = TelemetryConfig {
            log_level: "indexer=verbose".to_string(),
            ..TelemetryConfig::default()
        };
        let err = tracing_setup::init_tracing(&config).err();
        assert!(matches!(err, Some(TelemetryError::Config(_))));
    }
}
