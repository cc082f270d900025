//! # Entity Store Adapter (si-01)
//!
//! Durable mapping from an entity kind plus id to an encoded record, with
//! load-by-id, upsert and atomic batch write.
//!
//! ## Role in System
//!
//! ```text
//! Ingestion (si-04) ──→ Aggregates (si-02) ──→ [EntityStore] ──→ memory | RocksDB
//!        │                                            ↑
//!        └──────────── event records ─────────────────┘
//! ```
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): `EntityKind`, `WriteOp`, `Entity` codec, `StoreError`
//! - **Ports Layer** (`ports/`): `EntityStore` trait
//! - **Adapters Layer** (`adapters/`): `InMemoryEntityStore`, `RocksDbEntityStore`
//!
//! ## Guarantees
//!
//! - `write_batch` is all-or-nothing, which is what gives per-event atomicity upstream
//! - No delete operation is exposed: aggregate rows are never removed

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryEntityStore;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbEntityStore};
pub use domain::{
    decode, encode, load_entity, save_entity, write_op, Entity, EntityKind, StoreError, WriteOp,
};
pub use ports::EntityStore;
