//! # Correlation Engine
//!
//! Pairs an inbound transfer to the router with the outbound transfer from
//! the router in the same transaction.
//!
//! ## Algorithm
//!
//! For each transfer, in ledger order:
//! 1. `to == router`: buffer under `(tx_hash, from)`
//! 2. otherwise `from == router`: consume the input under `(tx_hash, to)` and
//!    emit a [`Swap`], or report it unmatched
//! 3. otherwise: unrelated
//!
//! A transfer with both `from` and `to` equal to the router is treated as an
//! inbound leg only, so it never matches itself.

use shared_types::TransferEvent;
use tracing::{debug, trace};

use crate::adapters::InMemoryPendingInputs;
use crate::domain::{
    CorrelationConfig, CorrelationError, CorrelationStats, MatchingPolicy, Observation,
    PendingInput, PendingKey, Swap,
};
use crate::ports::{PendingInputStore, SwapCorrelationApi};

pub struct CorrelationEngine<P: PendingInputStore = InMemoryPendingInputs> {
    config: CorrelationConfig,
    pending: P,
    next_seq: u64,
    /// Highest block observed so far.
    head_block: Option<u64>,
    stats: CorrelationStats,
}

impl CorrelationEngine<InMemoryPendingInputs> {
    pub fn new(config: CorrelationConfig) -> Result<Self, CorrelationError> {
        Self::with_store(config, InMemoryPendingInputs::new())
    }
}

impl<P: PendingInputStore> CorrelationEngine<P> {
    pub fn with_store(config: CorrelationConfig, pending: P) -> Result<Self, CorrelationError> {
        config.validate()?;
        debug!(
            router = %config.router,
            policy = %config.policy,
            max_age_blocks = ?config.eviction.max_age_blocks,
            max_pending = ?config.eviction.max_pending,
            "Correlation engine configured"
        );
        Ok(Self {
            config,
            pending,
            next_seq: 0,
            head_block: None,
            stats: CorrelationStats::default(),
        })
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn store_input(&mut self, transfer: &TransferEvent) -> Observation {
        let key = PendingKey::for_input(transfer);

        // A last-write-wins overwrite does not grow the map.
        let incoming = match self.config.policy {
            MatchingPolicy::LastWriteWins if self.pending.contains(&key) => 0,
            _ => 1,
        };
        self.enforce_max_pending(incoming);

        let input = PendingInput {
            transfer: transfer.clone(),
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let displaced = match self.config.policy {
            MatchingPolicy::LastWriteWins => self.pending.replace(key, input).pop(),
            MatchingPolicy::Fifo => {
                self.pending.push_back(key, input);
                None
            }
        };

        self.stats.stored += 1;
        if let Some(old) = &displaced {
            self.stats.displaced += 1;
            debug!(key = %key, displaced_seq = old.seq, "Pending input overwritten");
        } else {
            trace!(key = %key, "Pending input stored");
        }

        Observation::Stored { key, displaced }
    }

    fn match_output(&mut self, transfer: &TransferEvent) -> Observation {
        let key = PendingKey::for_output(transfer);
        match self.pending.pop_oldest(&key) {
            Some(input) => {
                self.stats.matched += 1;
                trace!(key = %key, "Swap matched");
                Observation::Matched {
                    swap: Swap {
                        input: input.transfer,
                        output: transfer.clone(),
                    },
                    consumed_seq: input.seq,
                }
            }
            None => {
                self.stats.unmatched += 1;
                trace!(key = %key, "Outbound router transfer without pending input");
                Observation::Unmatched { key }
            }
        }
    }

    /// Make room so that `incoming` more entries fit under `max_pending`.
    fn enforce_max_pending(&mut self, incoming: usize) -> usize {
        let Some(max) = self.config.eviction.max_pending else {
            return 0;
        };
        let len = self.pending.len();
        if len + incoming <= max {
            return 0;
        }

        let excess = (len + incoming - max).min(len);
        let mut seqs = self.pending.sequences();
        seqs.sort_unstable();
        let Some(&cutoff) = seqs.get(excess) else {
            let dropped = self.pending.len();
            self.pending.clear();
            self.record_evictions(dropped, "max_pending");
            return dropped;
        };

        let removed = self.pending.retain(&mut |_, input| input.seq >= cutoff);
        self.record_evictions(removed.len(), "max_pending");
        removed.len()
    }

    fn evict_older_than(&mut self, current_block: u64) -> usize {
        let Some(max_age) = self.config.eviction.max_age_blocks else {
            return 0;
        };
        let removed = self
            .pending
            .retain(&mut |_, input| current_block.saturating_sub(input.block_number()) <= max_age);
        self.record_evictions(removed.len(), "max_age_blocks");
        removed.len()
    }

    fn record_evictions(&mut self, count: usize, reason: &'static str) {
        if count > 0 {
            self.stats.evicted += count as u64;
            debug!(count, reason, "Evicted pending inputs");
        }
    }
}

impl<P: PendingInputStore> SwapCorrelationApi for CorrelationEngine<P> {
    fn observe_detailed(&mut self, transfer: &TransferEvent) -> Observation {
        if self.head_block.map_or(true, |head| transfer.block_number > head) {
            self.head_block = Some(transfer.block_number);
            if self.config.eviction.max_age_blocks.is_some() {
                self.evict_older_than(transfer.block_number);
            }
        }

        let router = self.config.router;
        if transfer.to == router {
            self.store_input(transfer)
        } else if transfer.from == router {
            self.match_output(transfer)
        } else {
            Observation::Unrelated
        }
    }

    fn revert(&mut self, observation: Observation) {
        match observation {
            Observation::Unrelated => {}
            Observation::Stored { key, displaced } => {
                self.pending.pop_newest(&key);
                self.stats.stored = self.stats.stored.saturating_sub(1);
                if let Some(old) = displaced {
                    self.pending.push_back(key, old);
                    self.stats.displaced = self.stats.displaced.saturating_sub(1);
                }
            }
            Observation::Matched { swap, consumed_seq } => {
                let key = PendingKey::for_input(&swap.input);
                self.pending.push_front(
                    key,
                    PendingInput {
                        transfer: swap.input,
                        seq: consumed_seq,
                    },
                );
                self.stats.matched = self.stats.matched.saturating_sub(1);
            }
            Observation::Unmatched { .. } => {
                self.stats.unmatched = self.stats.unmatched.saturating_sub(1);
            }
        }
    }

    fn evict_stale(&mut self, current_block: u64) -> usize {
        self.evict_older_than(current_block) + self.enforce_max_pending(0)
    }

    fn discard_from_block(&mut self, block: u64) -> usize {
        let removed = self
            .pending
            .retain(&mut |_, input| input.block_number() < block);
        if !removed.is_empty() {
            self.stats.discarded += removed.len() as u64;
            debug!(from_block = block, count = removed.len(), "Discarded pending inputs");
        }
        if self.head_block.is_some_and(|head| head >= block) {
            self.head_block = block.checked_sub(1);
        }
        removed.len()
    }

    fn clear(&mut self) {
        let dropped = self.pending.len();
        self.pending.clear();
        self.head_block = None;
        if dropped > 0 {
            debug!(dropped, "Cleared pending inputs");
        }
    }

    fn stats(&self) -> CorrelationStats {
        CorrelationStats {
            pending: self.pending.len(),
            ..self.stats
        }
    }
}
