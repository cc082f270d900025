//! # Adapters Layer
//!
//! - `memory`: in-process store for tests and ephemeral runs
//! - `rocks`: durable RocksDB store (feature `rocksdb`)

pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocks;

pub use memory::InMemoryEntityStore;
#[cfg(feature = "rocksdb")]
pub use rocks::{RocksDbConfig, RocksDbEntityStore};
