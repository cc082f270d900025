//! Prometheus metrics for the swap indexer.
//!
//! All metrics follow the naming convention: `si_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Transfers run through correlation and aggregation
    pub static ref TRANSFERS_PROCESSED: Counter = Counter::new(
        "si_transfers_processed_total",
        "Total transfer events processed"
    ).expect("metric creation failed");

    /// Swaps produced by pairing router legs
    pub static ref SWAPS_MATCHED: Counter = Counter::new(
        "si_swaps_matched_total",
        "Total swaps detected by correlating inbound and outbound router transfers"
    ).expect("metric creation failed");

    /// Inbound legs waiting for a match
    pub static ref PENDING_INPUTS: Gauge = Gauge::new(
        "si_pending_inputs",
        "Inbound router transfers awaiting their outbound leg"
    ).expect("metric creation failed");

    /// Pending inputs dropped by the eviction policy
    pub static ref PENDING_EVICTED: Counter = Counter::new(
        "si_pending_evicted_total",
        "Pending inputs evicted by age or count limits"
    ).expect("metric creation failed");

    /// Ledger events processed, by kind
    pub static ref EVENTS_PROCESSED: CounterVec = CounterVec::new(
        Opts::new("si_events_processed_total", "Ledger events processed"),
        &["event"]  // transfer, approval, swapped, ...
    ).expect("metric creation failed");

    /// Atomic batch write latency
    pub static ref STORE_COMMIT_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "si_store_commit_duration_seconds",
            "Time spent committing one event's rows to the entity store"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid bucket layout"))
    ).expect("metric creation failed");

    /// Events that failed, by error kind
    pub static ref INGESTION_ERRORS: CounterVec = CounterVec::new(
        Opts::new("si_ingestion_errors_total", "Events that failed to apply"),
        &["kind"]  // store, codec, rollback
    ).expect("metric creation failed");
}

/// Proof that the metrics are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSFERS_PROCESSED.clone()),
        Box::new(SWAPS_MATCHED.clone()),
        Box::new(PENDING_INPUTS.clone()),
        Box::new(PENDING_EVICTED.clone()),
        Box::new(EVENTS_PROCESSED.clone()),
        Box::new(STORE_COMMIT_DURATION.clone()),
        Box::new(INGESTION_ERRORS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
