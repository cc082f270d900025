//! End-to-end flows over the in-memory store.
//!
//! ```text
//! NDJSON ──→ source::pump ──mpsc──→ Pipeline::run ──→ EntityStore
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::*;

    use indexer_runtime::container::{
        build_dispatcher, open_store, IndexerConfig, SharedStore, StorageConfig,
    };
    use indexer_runtime::pipeline::{Pipeline, PipelineStats};
    use indexer_runtime::source::{self, parse_line};
    use shared_types::{
        Address, ApprovalEvent, EventMeta, LedgerEvent, SwappedEvent, U256,
    };
    use si_01_entity_store::{load_entity, EntityKind, EntityStore};
    use si_02_aggregates::{Account, Asset, DailyBucket, UniqueUsersMode};
    use si_03_swap_correlation::MatchingPolicy;
    use tokio::sync::{mpsc, watch};

    // =========================================================================
    // HARNESS
    // =========================================================================

    async fn run_ndjson(config: &IndexerConfig, input: String) -> (SharedStore, PipelineStats) {
        let store = open_store(&StorageConfig::default()).unwrap();
        let dispatcher = build_dispatcher(config, store.clone()).unwrap();

        let (tx, rx) = mpsc::channel(config.source.channel_capacity);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let (sent, stats) = tokio::join!(
            source::pump(input.as_bytes(), tx),
            Pipeline::new(dispatcher).run(rx, shutdown_rx)
        );
        sent.unwrap();
        (store, stats.unwrap())
    }

    fn lines(events: impl IntoIterator<Item = LedgerEvent>) -> String {
        events
            .into_iter()
            .map(|e| ndjson(&e) + "\n")
            .collect()
    }

    fn account(store: &SharedStore, address: Address) -> Account {
        load_entity::<Account, _>(store.as_ref(), &address.to_hex())
            .unwrap()
            .expect("account row")
    }

    fn bucket(store: &SharedStore, timestamp: u64) -> DailyBucket {
        load_entity::<DailyBucket, _>(store.as_ref(), &DailyBucket::key_for(timestamp))
            .unwrap()
            .expect("bucket row")
    }

    fn ts(block: u64) -> u64 {
        BASE_TS + block * 12
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_swaps_and_plain_transfers() {
        let alice = user(1);
        let bob = user(2);
        let carol = user(3);

        let mut events = Vec::new();
        events.extend(swap_pair(alice, 100, 95, 1, 1).map(LedgerEvent::Transfer));
        events.extend(swap_pair(bob, 200, 190, 2, 2).map(LedgerEvent::Transfer));
        // Inbound leg with no outbound yet.
        events.push(LedgerEvent::Transfer(transfer(carol, router(), 50, tx(3), 3, 0)));
        events.push(LedgerEvent::Transfer(transfer(alice, bob, 7, tx(4), 4, 0)));

        let (store, stats) = run_ndjson(&IndexerConfig::default(), lines(events)).await;

        assert_eq!(stats.events, 6);
        assert_eq!(stats.transfers, 6);
        assert_eq!(stats.swaps, 2);
        assert_eq!(stats.pending, 1);

        let a = account(&store, alice);
        assert_eq!(a.total_swaps, U256::one());
        assert_eq!(a.total_volume, U256::from(100u64));
        assert_eq!(a.swap_count, U256::zero());
        assert_eq!(a.first_seen, ts(1));
        assert_eq!(a.last_seen, ts(4));

        let c = account(&store, carol);
        assert_eq!(c.total_swaps, U256::zero());
        assert_eq!(c.first_seen, ts(3));

        let day = bucket(&store, ts(1));
        assert_eq!(day.swap_count, U256::from(2u64));
        assert_eq!(day.total_volume, U256::from(300u64));
        assert_eq!(day.unique_users, U256::from(2u64));

        let asset = load_entity::<Asset, _>(store.as_ref(), TOKEN).unwrap().unwrap();
        assert_eq!(asset.symbol, "1INCH");
        assert_eq!(asset.decimals, 18);
        assert_eq!(asset.transfer_count, U256::from(6u64));

        assert_eq!(store.count(EntityKind::Transfer).unwrap(), 6);
        assert_eq!(store.count(EntityKind::DailyBucket).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_users_modes_diverge_on_repeat_trader() {
        let alice = user(7);
        let mut events = Vec::new();
        events.extend(swap_pair(alice, 10, 9, 1, 1).map(LedgerEvent::Transfer));
        events.extend(swap_pair(alice, 20, 19, 2, 2).map(LedgerEvent::Transfer));
        let input = lines(events);

        let (approx, _) = run_ndjson(&IndexerConfig::default(), input.clone()).await;
        assert_eq!(bucket(&approx, ts(1)).unique_users, U256::from(2u64));

        let mut config = IndexerConfig::default();
        config.aggregates.unique_users = UniqueUsersMode::Distinct;
        let (distinct, _) = run_ndjson(&config, input).await;
        let day = bucket(&distinct, ts(1));
        assert_eq!(day.unique_users, U256::one());
        assert_eq!(day.swap_count, U256::from(2u64));
    }

    #[tokio::test]
    async fn test_fifo_pairs_oldest_input() {
        let alice = user(1);
        let shared_tx = tx(9);
        let events = vec![
            transfer(alice, router(), 100, shared_tx, 5, 0),
            transfer(alice, router(), 300, shared_tx, 5, 1),
            transfer(router(), alice, 90, shared_tx, 5, 2),
            transfer(router(), alice, 280, shared_tx, 5, 3),
        ];
        let input = lines(events.into_iter().map(LedgerEvent::Transfer));

        let (lww, lww_stats) = run_ndjson(&IndexerConfig::default(), input.clone()).await;
        assert_eq!(lww_stats.swaps, 1);
        assert_eq!(account(&lww, alice).total_volume, U256::from(300u64));

        let mut config = IndexerConfig::default();
        config.correlation.policy = MatchingPolicy::Fifo;
        let (fifo, fifo_stats) = run_ndjson(&config, input).await;
        assert_eq!(fifo_stats.swaps, 2);
        assert_eq!(account(&fifo, alice).total_volume, U256::from(400u64));
    }

    #[tokio::test]
    async fn test_reorg_line_discards_pending_inputs() {
        let alice = user(1);
        let input = [
            ndjson(&LedgerEvent::Transfer(transfer(alice, router(), 100, tx(1), 10, 0))),
            reorg_line(10),
            // The orphaned inbound leg is gone; this outbound leg finds nothing.
            ndjson(&LedgerEvent::Transfer(transfer(router(), alice, 95, tx(1), 10, 1))),
        ]
        .join("\n");

        let (store, stats) = run_ndjson(&IndexerConfig::default(), input).await;
        assert_eq!(stats.reorgs, 1);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(account(&store, alice).total_swaps, U256::zero());
    }

    #[tokio::test]
    async fn test_router_events_update_aggregates() {
        let alice = user(1);
        let meta = |log_index| EventMeta {
            contract: router(),
            tx_hash: tx(11),
            log_index,
            block_number: 20,
            timestamp: ts(20),
        };
        let events = vec![
            LedgerEvent::Approval(ApprovalEvent {
                owner: alice,
                spender: router(),
                value: U256::MAX,
                meta: EventMeta {
                    contract: token(),
                    ..meta(0)
                },
            }),
            LedgerEvent::Swapped(SwappedEvent {
                sender: alice,
                src_receiver: router(),
                dst_receiver: alice,
                src_token: token(),
                dst_token: user(99),
                amount: U256::from(1_000u64),
                amount_received: U256::from(990u64),
                meta: meta(1),
            }),
        ];

        let (store, stats) = run_ndjson(&IndexerConfig::default(), lines(events)).await;
        assert_eq!(stats.events, 2);
        assert_eq!(stats.transfers, 0);

        let a = account(&store, alice);
        assert_eq!(a.swap_count, U256::one());
        assert_eq!(a.total_swaps, U256::one());
        assert_eq!(a.total_volume, U256::from(1_000u64));

        let day = bucket(&store, ts(20));
        assert_eq!(day.swap_count, U256::one());
        assert_eq!(day.unique_users, U256::zero());

        let asset = load_entity::<Asset, _>(store.as_ref(), TOKEN).unwrap().unwrap();
        assert_eq!(asset.approval_count, U256::one());
        assert_eq!(store.count(EntityKind::Approval).unwrap(), 1);
        assert_eq!(store.count(EntityKind::Swapped).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_malformed_line_halts_before_later_events() {
        let alice = user(1);
        let input = [
            ndjson(&LedgerEvent::Transfer(transfer(alice, user(2), 1, tx(1), 1, 0))),
            "{\"event\":\"Transfer\",\"from\":\"nope\"}".to_string(),
            ndjson(&LedgerEvent::Transfer(transfer(alice, user(2), 1, tx(2), 2, 0))),
        ]
        .join("\n");

        let store = open_store(&StorageConfig::default()).unwrap();
        let dispatcher = build_dispatcher(&IndexerConfig::default(), store.clone()).unwrap();
        let (tx, rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let (sent, stats) = tokio::join!(
            source::pump(input.as_bytes(), tx),
            Pipeline::new(dispatcher).run(rx, shutdown_rx)
        );
        assert!(sent.is_err());
        assert_eq!(stats.unwrap().events, 1);
        assert_eq!(store.count(EntityKind::Transfer).unwrap(), 1);
    }

    #[test]
    fn test_parsed_lines_drive_pipeline_synchronously() {
        let store = open_store(&StorageConfig::default()).unwrap();
        let mut pipeline =
            Pipeline::new(build_dispatcher(&IndexerConfig::default(), store.clone()).unwrap());

        let alice = user(5);
        for (n, event) in swap_pair(alice, 42, 40, 1, 3).into_iter().enumerate() {
            let item = parse_line(n as u64 + 1, &ndjson(&LedgerEvent::Transfer(event))).unwrap();
            pipeline.process(item).unwrap();
        }

        assert_eq!(pipeline.stats().swaps, 1);
        assert_eq!(account(&store, alice).total_volume, U256::from(42u64));
    }
}
