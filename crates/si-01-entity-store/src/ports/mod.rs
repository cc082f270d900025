//! # Ports Layer
//!
//! The driven port every aggregate and record writer goes through.

use crate::domain::{EntityKind, StoreError, WriteOp};
use std::sync::Arc;

/// Durable mapping from (kind, id) to an encoded record.
///
/// Rows are only ever upserted; nothing in the indexer deletes them.
pub trait EntityStore: Send + Sync {
    /// Load a record by id.
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or overwrite a single record.
    fn upsert(&self, kind: EntityKind, id: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Apply all operations atomically: either every op lands or none does.
    fn write_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError>;

    /// Number of rows in a collection.
    fn count(&self, kind: EntityKind) -> Result<usize, StoreError>;
}

impl<S: EntityStore + ?Sized> EntityStore for Arc<S> {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(kind, id)
    }

    fn upsert(&self, kind: EntityKind, id: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).upsert(kind, id, value)
    }

    fn write_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        (**self).write_batch(ops)
    }

    fn count(&self, kind: EntityKind) -> Result<usize, StoreError> {
        (**self).count(kind)
    }
}
