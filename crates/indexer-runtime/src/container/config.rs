//! # Indexer Configuration
//!
//! Unified configuration for the pipeline and every subsystem, loaded from
//! `SI_*` environment variables. Unset variables keep their defaults; set
//! but malformed variables are errors.

use si_02_aggregates::{AggregateConfig, UniqueUsersMode};
use si_03_swap_correlation::{CorrelationConfig, CorrelationError, EvictionPolicy, MatchingPolicy};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete indexer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Router address, matching policy, pending-input bounds.
    pub correlation: CorrelationConfig,
    /// Unique-users mode.
    pub aggregates: AggregateConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Event source configuration.
    pub source: SourceConfig,
}

/// Which entity store backs the aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    RocksDb,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// RocksDB directory.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data/rocksdb"),
        }
    }
}

/// Event source configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// NDJSON file to read; stdin when `None`.
    pub events_file: Option<PathBuf>,
    /// Bound of the source → pipeline channel.
    pub channel_capacity: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            events_file: None,
            channel_capacity: 1000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    #[error("Store backend '{0}' is not compiled in (enable the `rocksdb` feature)")]
    BackendUnavailable(&'static str),
}

impl IndexerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from any variable lookup.
    ///
    /// # Variables
    ///
    /// - `SI_ROUTER_ADDRESS`: router contract (default: aggregation router v6)
    /// - `SI_MATCHING_POLICY`: `last-write-wins` or `fifo`
    /// - `SI_UNIQUE_USERS`: `approximate` or `distinct`
    /// - `SI_PENDING_MAX_AGE_BLOCKS`: evict pending inputs older than N blocks
    /// - `SI_PENDING_MAX_ENTRIES`: cap on pending inputs
    /// - `SI_STORE_BACKEND`: `memory` or `rocksdb`
    /// - `SI_DATA_DIR`: RocksDB directory (default: ./data/rocksdb)
    /// - `SI_EVENTS_FILE`: NDJSON input (default: stdin)
    /// - `SI_CHANNEL_CAPACITY`: source buffer (default: 1000)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(router) = parse_var(&lookup, "SI_ROUTER_ADDRESS")? {
            config.correlation.router = router;
        }
        if let Some(policy) = lookup("SI_MATCHING_POLICY") {
            config.correlation.policy = MatchingPolicy::from_str(&policy)?;
        }
        if let Some(mode) = parse_var::<UniqueUsersMode, _>(&lookup, "SI_UNIQUE_USERS")? {
            config.aggregates.unique_users = mode;
        }
        config.correlation.eviction = EvictionPolicy {
            max_age_blocks: parse_var(&lookup, "SI_PENDING_MAX_AGE_BLOCKS")?,
            max_pending: parse_var(&lookup, "SI_PENDING_MAX_ENTRIES")?,
        };

        if let Some(backend) = parse_var(&lookup, "SI_STORE_BACKEND")? {
            config.storage.backend = backend;
        }
        if let Some(dir) = lookup("SI_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }

        config.source.events_file = lookup("SI_EVENTS_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        if let Some(capacity) = parse_var::<usize, _>(&lookup, "SI_CHANNEL_CAPACITY")? {
            if capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "SI_CHANNEL_CAPACITY",
                    value: capacity.to_string(),
                    reason: "must be at least 1".into(),
                });
            }
            config.source.channel_capacity = capacity;
        }

        config.correlation.validate()?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            }),
    }
}
