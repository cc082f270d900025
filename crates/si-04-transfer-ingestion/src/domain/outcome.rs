use si_02_aggregates::CommitSummary;
use si_03_swap_correlation::Swap;
use std::time::Duration;

/// What processing one ledger event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// `LedgerEvent::name()` of the processed event.
    pub event: &'static str,
    /// Correlation result label, for transfers only.
    pub observation: Option<&'static str>,
    /// Swap completed by this event.
    pub swap: Option<Swap>,
    pub committed: CommitSummary,
    pub commit_duration: Duration,
}

impl EventOutcome {
    pub fn is_swap(&self) -> bool {
        self.swap.is_some()
    }
}

/// Result of a reorg notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorgReport {
    pub from_block: u64,
    /// Pending inputs dropped from the correlation engine.
    pub pending_discarded: usize,
    /// False when the aggregate store cannot rewind (the usual case).
    pub aggregates_rewound: bool,
}
