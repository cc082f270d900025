//! # Subsystem Container
//!
//! Opens the entity store and wires the aggregate repository and the
//! correlation engine into one ledger event dispatcher.
//!
//! ```text
//! EntityStore (si-01) ← StagedAggregateRepository (si-02) ┐
//!                                                          ├→ LedgerEventDispatcher (si-04)
//!                        CorrelationEngine (si-03) ────────┘
//! ```

pub mod config;

pub use config::{ConfigError, IndexerConfig, SourceConfig, StorageConfig, StoreBackend};

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use si_01_entity_store::{EntityStore, InMemoryEntityStore};
use si_02_aggregates::StagedAggregateRepository;
use si_03_swap_correlation::CorrelationEngine;
use si_04_transfer_ingestion::LedgerEventDispatcher;

/// Entity store behind the repository, chosen at startup.
pub type SharedStore = Arc<dyn EntityStore>;

/// Concrete dispatcher used by the runtime.
pub type IndexerDispatcher =
    LedgerEventDispatcher<StagedAggregateRepository<SharedStore>, CorrelationEngine>;

/// Open the configured entity store.
pub fn open_store(config: &StorageConfig) -> Result<SharedStore> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory entity store");
            Ok(Arc::new(InMemoryEntityStore::new()))
        }
        StoreBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StorageConfig) -> Result<SharedStore> {
    use si_01_entity_store::{RocksDbConfig, RocksDbEntityStore};

    let rocks = RocksDbConfig {
        path: config.data_dir.clone(),
        ..RocksDbConfig::default()
    };
    let store = RocksDbEntityStore::open(rocks)
        .with_context(|| format!("Failed to open RocksDB at {}", config.data_dir.display()))?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StorageConfig) -> Result<SharedStore> {
    Err(ConfigError::BackendUnavailable("rocksdb").into())
}

/// Build the dispatcher over `store`.
pub fn build_dispatcher(config: &IndexerConfig, store: SharedStore) -> Result<IndexerDispatcher> {
    let repository = StagedAggregateRepository::new(store, config.aggregates.clone());
    let correlation = CorrelationEngine::new(config.correlation.clone())
        .context("Invalid correlation configuration")?;

    info!(
        router = %config.correlation.router,
        policy = %config.correlation.policy,
        unique_users = %config.aggregates.unique_users,
        "Ingestion dispatcher ready"
    );
    Ok(LedgerEventDispatcher::new(repository, correlation))
}
