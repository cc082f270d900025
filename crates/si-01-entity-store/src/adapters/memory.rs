use crate::domain::{EntityKind, StoreError, WriteOp};
use crate::ports::EntityStore;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

type Collections = HashMap<EntityKind, BTreeMap<String, Vec<u8>>>;

/// In-memory implementation of EntityStore.
///
/// Used by tests and by runtimes started with the `memory` backend.
/// A batch is applied under a single write lock.
pub struct InMemoryEntityStore {
    collections: RwLock<Collections>,
    /// Committed write operations (single upserts + batch ops).
    writes: AtomicU64,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            writes: AtomicU64::new(0),
        }
    }

    /// Ids currently stored in a collection, sorted.
    pub fn ids(&self, kind: EntityKind) -> Vec<String> {
        self.collections
            .read()
            .get(&kind)
            .map(|rows| rows.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total row-level writes applied so far.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let collections = self.collections.read();
        Ok(collections.get(&kind).and_then(|rows| rows.get(id)).cloned())
    }

    fn upsert(&self, kind: EntityKind, id: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        collections
            .entry(kind)
            .or_default()
            .insert(id.to_string(), value);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn write_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let applied = ops.len() as u64;
        for op in ops {
            collections.entry(op.kind).or_default().insert(op.id, op.value);
        }
        self.writes.fetch_add(applied, Ordering::Relaxed);
        Ok(())
    }

    fn count(&self, kind: EntityKind) -> Result<usize, StoreError> {
        let collections = self.collections.read();
        Ok(collections.get(&kind).map(|rows| rows.len()).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_operations() {
        let store = InMemoryEntityStore::new();

        // Upsert
        store
            .upsert(EntityKind::Account, "0xaa", vec![1, 2, 3])
            .unwrap();

        // Load
        let loaded = store.load(EntityKind::Account, "0xaa").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        // Same id, different kind is a different row
        assert_eq!(store.load(EntityKind::Asset, "0xaa").unwrap(), None);

        // Overwrite
        store.upsert(EntityKind::Account, "0xaa", vec![9]).unwrap();
        assert_eq!(
            store.load(EntityKind::Account, "0xaa").unwrap(),
            Some(vec![9])
        );
        assert_eq!(store.count(EntityKind::Account).unwrap(), 1);
    }

    #[test]
    fn test_write_batch() {
        let store = InMemoryEntityStore::new();

        store
            .write_batch(vec![
                WriteOp::new(EntityKind::Account, "0x01", vec![1]),
                WriteOp::new(EntityKind::Account, "0x02", vec![2]),
                WriteOp::new(EntityKind::DailyBucket, "86400", vec![3]),
            ])
            .unwrap();

        assert_eq!(store.count(EntityKind::Account).unwrap(), 2);
        assert_eq!(store.count(EntityKind::DailyBucket).unwrap(), 1);
        assert_eq!(store.ids(EntityKind::Account), vec!["0x01", "0x02"]);
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn test_empty_collection() {
        let store = InMemoryEntityStore::new();
        assert_eq!(store.count(EntityKind::Swapped).unwrap(), 0);
        assert!(store.ids(EntityKind::Swapped).is_empty());
    }
}
