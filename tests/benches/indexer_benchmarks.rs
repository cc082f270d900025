//! # Swap Indexer Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | si-03 Swap Correlation | observe (store + match) | < 5µs per leg |
//! | si-04 Transfer Ingestion | full event, in-memory store | < 50µs per event |
//! | indexer-runtime source | NDJSON line parse | < 10µs per line |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use indexer_runtime::container::{build_dispatcher, open_store, IndexerConfig, StorageConfig};
use indexer_runtime::source::parse_line;
use shared_types::LedgerEvent;
use si_03_swap_correlation::{
    CorrelationConfig, CorrelationEngine, EvictionPolicy, MatchingPolicy, SwapCorrelationApi,
};
use si_04_transfer_ingestion::LedgerIngestionApi;
use si_tests::fixtures::{ndjson, swap_pair, user};

// ============================================================================
// SI-03: Swap Correlation
// ============================================================================

fn bench_correlation_observe(c: &mut Criterion) {
    let mut group = c.benchmark_group("si-03-swap-correlation");
    group.measurement_time(Duration::from_secs(10));

    for policy in [MatchingPolicy::LastWriteWins, MatchingPolicy::Fifo] {
        let pairs: Vec<_> = (0..1_000u64)
            .map(|n| swap_pair(user(n as u32), 100, 99, n, n / 10))
            .collect();

        group.throughput(Throughput::Elements(pairs.len() as u64 * 2));
        group.bench_with_input(
            BenchmarkId::new("observe_pairs", policy),
            &pairs,
            |b, pairs| {
                b.iter(|| {
                    let mut engine = CorrelationEngine::new(CorrelationConfig {
                        policy,
                        ..Default::default()
                    })
                    .unwrap();
                    for [inbound, outbound] in pairs {
                        engine.observe(inbound);
                        black_box(engine.observe(outbound));
                    }
                })
            },
        );
    }

    // Eviction cost with a full pending set.
    let inputs: Vec<_> = (0..10_000u64)
        .map(|n| swap_pair(user(n as u32), 1, 1, n, n / 100)[0].clone())
        .collect();
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("store_with_count_cap", |b| {
        b.iter(|| {
            let mut engine = CorrelationEngine::new(CorrelationConfig {
                eviction: EvictionPolicy {
                    max_age_blocks: Some(32),
                    max_pending: Some(1_000),
                },
                ..Default::default()
            })
            .unwrap();
            for input in &inputs {
                black_box(engine.observe(input));
            }
        })
    });

    group.finish();
}

// ============================================================================
// SI-04: Transfer Ingestion
// ============================================================================

fn bench_dispatcher_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("si-04-transfer-ingestion");
    group.measurement_time(Duration::from_secs(10));

    for swaps in [100u64, 1_000] {
        let events: Vec<LedgerEvent> = (0..swaps)
            .flat_map(|n| swap_pair(user((n % 64) as u32), 1_000, 990, n, n / 20))
            .map(LedgerEvent::Transfer)
            .collect();

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::new("swap_events", swaps), &events, |b, events| {
            b.iter(|| {
                let store = open_store(&StorageConfig::default()).unwrap();
                let mut dispatcher = build_dispatcher(&IndexerConfig::default(), store).unwrap();
                for event in events {
                    black_box(dispatcher.handle(event.clone()).unwrap());
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// Runtime: NDJSON source
// ============================================================================

fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexer-runtime-source");

    let [inbound, _] = swap_pair(user(1), 123_456_789, 0, 1, 1);
    let line = ndjson(&LedgerEvent::Transfer(inbound));

    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("parse_transfer_line", |b| {
        b.iter(|| black_box(parse_line(1, black_box(&line)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_correlation_observe,
    bench_dispatcher_throughput,
    bench_parse_line
);
criterion_main!(benches);
