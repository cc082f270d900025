//! # RocksDB Entity Store
//!
//! Durable implementation of the EntityStore port.
//!
//! ## Features
//!
//! - One column family per `EntityKind`
//! - Atomic batch writes (WriteBatch), which back the per-event commit
//! - Snappy compression, bloom filters for point lookups
//! - Optional fsync per write

use crate::domain::{EntityKind, StoreError, WriteOp};
use crate::ports::EntityStore;
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, DBCompressionType,
    IteratorMode, Options, WriteBatch, WriteOptions, DB,
};
use std::path::PathBuf;
use tracing::info;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 128MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 32MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            block_cache_size: 128 * 1024 * 1024,
            write_buffer_size: 32 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed entity store.
pub struct RocksDbEntityStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbEntityStore {
    /// Open or create the database with every entity column family.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = EntityKind::ALL
            .iter()
            .map(|kind| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(kind.as_str(), cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| StoreError::Backend(format!("Failed to open RocksDB: {}", e)))?;

        info!(path = %config.path.display(), "RocksDB entity store opened");

        Ok(Self { db, config })
    }

    fn cf(&self, kind: EntityKind) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(kind.as_str())
            .ok_or(StoreError::MissingColumnFamily(kind.as_str()))
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl EntityStore for RocksDbEntityStore {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let cf = self.cf(kind)?;
        self.db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| StoreError::Backend(format!("RocksDB get failed: {}", e)))
    }

    fn upsert(&self, kind: EntityKind, id: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let cf = self.cf(kind)?;
        self.db
            .put_cf_opt(cf, id.as_bytes(), value, &self.write_options())
            .map_err(|e| StoreError::Backend(format!("RocksDB put failed: {}", e)))
    }

    fn write_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut batch = WriteBatch::default();
        for op in ops {
            let cf = self.cf(op.kind)?;
            batch.put_cf(cf, op.id.as_bytes(), &op.value);
        }

        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| StoreError::Backend(format!("RocksDB batch write failed: {}", e)))
    }

    fn count(&self, kind: EntityKind) -> Result<usize, StoreError> {
        let cf = self.cf(kind)?;
        let mut rows = 0usize;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| StoreError::Backend(format!("RocksDB scan failed: {}", e)))?;
            rows += 1;
        }
        Ok(rows)
    }
}
