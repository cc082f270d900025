//! Restart flows over RocksDB.
//!
//! Aggregates written by one process must keep accumulating, with stable
//! `first_seen`, after the store is reopened by the next.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;

    use indexer_runtime::container::{
        build_dispatcher, open_store, IndexerConfig, StorageConfig, StoreBackend,
    };
    use indexer_runtime::pipeline::Pipeline;
    use indexer_runtime::source::SourceItem;
    use shared_types::{LedgerEvent, U256};
    use si_01_entity_store::{load_entity, EntityKind, EntityStore};
    use si_02_aggregates::{Account, DailyBucket};
    use tempfile::TempDir;

    fn rocks_config(dir: &TempDir) -> IndexerConfig {
        let mut config = IndexerConfig::default();
        config.storage = StorageConfig {
            backend: StoreBackend::RocksDb,
            data_dir: dir.path().join("rocksdb"),
        };
        config
    }

    fn process_all(config: &IndexerConfig, events: impl IntoIterator<Item = LedgerEvent>) {
        let store = open_store(&config.storage).unwrap();
        let mut pipeline = Pipeline::new(build_dispatcher(config, store).unwrap());
        for event in events {
            pipeline.process(SourceItem::Event(event)).unwrap();
        }
    }

    #[test]
    fn test_aggregates_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let config = rocks_config(&dir);
        let alice = user(1);

        process_all(&config, swap_pair(alice, 100, 95, 1, 1).map(LedgerEvent::Transfer));
        process_all(&config, swap_pair(alice, 50, 45, 2, 500).map(LedgerEvent::Transfer));

        let store = open_store(&config.storage).unwrap();
        let account = load_entity::<Account, _>(store.as_ref(), &alice.to_hex())
            .unwrap()
            .unwrap();
        assert_eq!(account.total_swaps, U256::from(2u64));
        assert_eq!(account.total_volume, U256::from(150u64));
        assert_eq!(account.first_seen, BASE_TS + 12);
        assert_eq!(account.last_seen, BASE_TS + 500 * 12);

        let day = load_entity::<DailyBucket, _>(store.as_ref(), &DailyBucket::key_for(BASE_TS))
            .unwrap()
            .unwrap();
        assert_eq!(day.swap_count, U256::from(2u64));
        assert_eq!(store.count(EntityKind::Transfer).unwrap(), 4);
    }

    #[test]
    fn test_pending_inputs_do_not_survive_restart() {
        let dir = TempDir::new().unwrap();
        let config = rocks_config(&dir);
        let alice = user(2);
        let [inbound, outbound] = swap_pair(alice, 10, 9, 1, 1);

        // The correlation map is process-local: a swap split across a
        // restart is never matched.
        process_all(&config, [LedgerEvent::Transfer(inbound)]);
        process_all(&config, [LedgerEvent::Transfer(outbound)]);

        let store = open_store(&config.storage).unwrap();
        let account = load_entity::<Account, _>(store.as_ref(), &alice.to_hex())
            .unwrap()
            .unwrap();
        assert_eq!(account.total_swaps, U256::zero());
        assert_eq!(store.count(EntityKind::DailyBucket).unwrap(), 0);
    }
}
