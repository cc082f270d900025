//! # Ingestion Pipeline
//!
//! Single consumer of the source channel. Events are applied strictly one
//! at a time; the first failed event halts the pipeline.

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use indexer_telemetry::{
    EVENTS_PROCESSED, INGESTION_ERRORS, PENDING_EVICTED, PENDING_INPUTS, STORE_COMMIT_DURATION,
    SWAPS_MATCHED, TRANSFERS_PROCESSED,
};
use si_03_swap_correlation::SwapCorrelationApi;
use si_04_transfer_ingestion::{EventOutcome, IngestionError, LedgerIngestionApi};

use crate::container::IndexerDispatcher;
use crate::source::{Sequenced, SourceItem};

/// Totals for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub events: u64,
    pub transfers: u64,
    pub swaps: u64,
    pub reorgs: u64,
    /// Pending inputs left in the correlation engine.
    pub pending: usize,
}

pub struct Pipeline {
    dispatcher: IndexerDispatcher,
    stats: PipelineStats,
    /// Engine eviction total already reported to metrics.
    evicted_reported: u64,
}

impl Pipeline {
    pub fn new(dispatcher: IndexerDispatcher) -> Self {
        Self {
            dispatcher,
            stats: PipelineStats::default(),
            evicted_reported: 0,
        }
    }

    pub fn dispatcher(&self) -> &IndexerDispatcher {
        &self.dispatcher
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Apply one item. Errors leave no trace of the item.
    pub fn process(&mut self, item: SourceItem) -> Result<(), IngestionError> {
        match item {
            SourceItem::Event(event) => {
                let name = event.name();
                match self.dispatcher.handle(event) {
                    Ok(outcome) => self.record(&outcome),
                    Err(err) => {
                        INGESTION_ERRORS.with_label_values(&[err.kind()]).inc();
                        return Err(err);
                    }
                }
                debug!(event = name, "Event applied");
            }
            SourceItem::Reorg { from_block } => {
                let report = self.dispatcher.handle_reorg(from_block)?;
                self.stats.reorgs += 1;
                if !report.aggregates_rewound {
                    warn!(from_block, "Aggregates include data from orphaned blocks");
                }
            }
        }
        self.refresh_pending();
        Ok(())
    }

    fn record(&mut self, outcome: &EventOutcome) {
        self.stats.events += 1;
        EVENTS_PROCESSED.with_label_values(&[outcome.event]).inc();
        STORE_COMMIT_DURATION.observe(outcome.commit_duration.as_secs_f64());

        if outcome.observation.is_some() {
            self.stats.transfers += 1;
            TRANSFERS_PROCESSED.inc();
        }
        if outcome.is_swap() {
            self.stats.swaps += 1;
            SWAPS_MATCHED.inc();
        }
    }

    fn refresh_pending(&mut self) {
        let correlation = self.dispatcher.correlation().stats();
        self.stats.pending = correlation.pending;
        PENDING_INPUTS.set(correlation.pending as f64);

        if correlation.evicted > self.evicted_reported {
            PENDING_EVICTED.inc_by((correlation.evicted - self.evicted_reported) as f64);
            self.evicted_reported = correlation.evicted;
        }
    }

    /// Drain `rx` until it closes or `shutdown` flips to true.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<Sequenced>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<PipelineStats> {
        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown signal received, pipeline stopping");
                        break;
                    }
                }
                next = rx.recv() => {
                    let Some(Sequenced { line, item }) = next else {
                        break;
                    };
                    if let Err(err) = self.process(item) {
                        error!(line, error = %err, "Event failed, halting pipeline");
                        return Err(err).with_context(|| format!("event on line {} failed", line));
                    }
                }
            }
        }

        info!(
            events = self.stats.events,
            transfers = self.stats.transfers,
            swaps = self.stats.swaps,
            pending = self.stats.pending,
            "Pipeline drained"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{build_dispatcher, open_store, IndexerConfig, StorageConfig};
    use shared_types::{Address, LedgerEvent, TransferEvent, TxHash, U256};
    use si_03_swap_correlation::DEFAULT_ROUTER;

    fn pipeline() -> Pipeline {
        let store = open_store(&StorageConfig::default()).unwrap();
        Pipeline::new(build_dispatcher(&IndexerConfig::default(), store).unwrap())
    }

    fn transfer(from: Address, to: Address, block: u64) -> SourceItem {
        SourceItem::Event(LedgerEvent::Transfer(TransferEvent {
            from,
            to,
            value: U256::from(10u8),
            asset: Address([0xEE; 20]),
            tx_hash: TxHash([block as u8; 32]),
            block_number: block,
            timestamp: 1_700_000_000 + block,
            log_index: 0,
        }))
    }

    #[test]
    fn test_process_counts_swaps() {
        let mut pipeline = pipeline();
        let user = Address([0x0A; 20]);

        pipeline.process(transfer(user, DEFAULT_ROUTER, 1)).unwrap();
        assert_eq!(pipeline.stats().pending, 1);
        pipeline.process(transfer(DEFAULT_ROUTER, user, 1)).unwrap();

        let stats = pipeline.stats();
        assert_eq!(stats.events, 2);
        assert_eq!(stats.transfers, 2);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.pending, 0);
    }

    #[test]
    fn test_reorg_item() {
        let mut pipeline = pipeline();
        pipeline
            .process(transfer(Address([1; 20]), DEFAULT_ROUTER, 10))
            .unwrap();
        pipeline.process(SourceItem::Reorg { from_block: 5 }).unwrap();

        let stats = pipeline.stats();
        assert_eq!(stats.reorgs, 1);
        assert_eq!(stats.pending, 0);
    }

    #[tokio::test]
    async fn test_run_until_channel_closes() {
        let (tx, rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let user = Address([0x0B; 20]);

        let handle = tokio::spawn(pipeline().run(rx, shutdown_rx));
        for (line, item) in [
            transfer(user, DEFAULT_ROUTER, 3),
            transfer(DEFAULT_ROUTER, user, 3),
        ]
        .into_iter()
        .enumerate()
        {
            tx.send(Sequenced {
                line: line as u64 + 1,
                item,
            })
            .await
            .unwrap();
        }
        drop(tx);

        let stats = handle.await.unwrap().unwrap();
        assert_eq!(stats.swaps, 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (_tx, rx) = mpsc::channel::<Sequenced>(4);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(pipeline().run(rx, shutdown_rx));
        shutdown_tx.send(true).unwrap();

        let stats = handle.await.unwrap().unwrap();
        assert_eq!(stats.events, 0);
    }
}
