use shared_types::TransferEvent;

use crate::domain::{CorrelationStats, Observation, Swap};

/// Swap correlation API.
///
/// Every call is synchronous and must be made from the single ingestion
/// consumer, in ledger order.
pub trait SwapCorrelationApi {
    /// Feed one transfer; returns the swap it completes, if any.
    fn observe(&mut self, transfer: &TransferEvent) -> Option<Swap> {
        self.observe_detailed(transfer).into_swap()
    }

    /// Feed one transfer and report exactly what changed.
    fn observe_detailed(&mut self, transfer: &TransferEvent) -> Observation;

    /// Undo the pending-map change recorded in `observation`.
    ///
    /// Evictions triggered while observing are not restored.
    fn revert(&mut self, observation: Observation);

    /// Apply the eviction policy as of `current_block`. Returns entries dropped.
    fn evict_stale(&mut self, current_block: u64) -> usize;

    /// Drop inputs seen at or after `block`. Returns entries dropped.
    fn discard_from_block(&mut self, block: u64) -> usize;

    /// Drop every pending input.
    fn clear(&mut self);

    fn stats(&self) -> CorrelationStats;
}
