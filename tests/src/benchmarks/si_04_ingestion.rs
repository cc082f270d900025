//! Full dispatcher throughput over the in-memory store.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use indexer_runtime::container::{build_dispatcher, open_store, IndexerConfig, StorageConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shared_types::{LedgerEvent, U256};
    use si_01_entity_store::{load_entity, EntityKind, EntityStore};
    use si_02_aggregates::DailyBucket;
    use si_04_transfer_ingestion::LedgerIngestionApi;

    #[test]
    fn brutal_random_swaps_conserve_volume() {
        let store = open_store(&StorageConfig::default()).unwrap();
        let mut dispatcher = build_dispatcher(&IndexerConfig::default(), store.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(0xB0B);

        let mut expected_volume = U256::zero();
        let swaps = 5_000u64;
        for n in 0..swaps {
            let amount: u64 = rng.gen_range(1..1_000_000);
            let trader = user(rng.gen_range(0..200));
            expected_volume += U256::from(amount);
            for leg in swap_pair(trader, amount, amount - amount / 100, n, n / 50) {
                dispatcher.handle(LedgerEvent::Transfer(leg)).unwrap();
            }
        }

        // All swaps land inside one day: 5_000 / 50 blocks * 12s.
        let day = load_entity::<DailyBucket, _>(store.as_ref(), &DailyBucket::key_for(BASE_TS))
            .unwrap()
            .unwrap();
        assert_eq!(day.swap_count, U256::from(swaps));
        assert_eq!(day.total_volume, expected_volume);
        assert_eq!(store.count(EntityKind::Transfer).unwrap(), (swaps * 2) as usize);
    }
}
