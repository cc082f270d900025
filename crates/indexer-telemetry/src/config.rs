//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and trace export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to exported spans
    pub service_name: String,

    /// Export spans over OTLP
    pub otlp_enabled: bool,

    /// OpenTelemetry OTLP endpoint
    pub otlp_endpoint: String,

    /// Log filter directive (trace, debug, info, warn, error, or per-target)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "swap-indexer".to_string(),
            otlp_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: swap-indexer)
    /// - `SI_OTLP_ENABLED`: Export spans over OTLP (default: false)
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: http://localhost:4317)
    /// - `SI_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `SI_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SI_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();
        let defaults = Self::default();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            otlp_enabled: env::var("SI_OTLP_ENABLED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),

            otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or(defaults.otlp_endpoint),

            log_level: env::var("SI_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: env::var("SI_CONSOLE_OUTPUT")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("SI_JSON_LOGS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(is_container),
        }
    }
}

/// `true/1/yes/on` or `false/0/no/off`, case-insensitive.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
