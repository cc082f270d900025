//! # Correlation Entities
//!
//! - [`PendingKey`]: `(tx_hash, counterparty)` of an inbound router leg
//! - [`PendingInput`]: the buffered inbound leg plus its arrival order
//! - [`Swap`]: a matched input/output pair
//! - [`Observation`]: what one `observe` call did to the pending map

use shared_types::{Address, TransferEvent, TxHash, U256};

/// Key of a pending inbound leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingKey {
    pub tx_hash: TxHash,
    /// The address that sent funds to the router.
    pub counterparty: Address,
}

impl PendingKey {
    pub fn new(tx_hash: TxHash, counterparty: Address) -> Self {
        Self {
            tx_hash,
            counterparty,
        }
    }

    /// Key under which an inbound leg is stored.
    pub fn for_input(transfer: &TransferEvent) -> Self {
        Self::new(transfer.tx_hash, transfer.from)
    }

    /// Key an outbound leg looks up.
    pub fn for_output(transfer: &TransferEvent) -> Self {
        Self::new(transfer.tx_hash, transfer.to)
    }
}

impl std::fmt::Display for PendingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.tx_hash.to_hex(), self.counterparty.to_hex())
    }
}

/// An inbound router leg awaiting its outbound counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInput {
    pub transfer: TransferEvent,
    /// Monotonic arrival sequence; lower is older.
    pub seq: u64,
}

impl PendingInput {
    pub fn block_number(&self) -> u64 {
        self.transfer.block_number
    }
}

/// Two transfers in one transaction routed through the intermediary.
///
/// `input.to == output.from == router` and both share `tx_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub input: TransferEvent,
    pub output: TransferEvent,
}

impl Swap {
    /// The address credited with the swap: the sender of the input leg.
    pub fn initiator(&self) -> Address {
        self.input.from
    }

    pub fn amount_in(&self) -> U256 {
        self.input.value
    }

    pub fn amount_out(&self) -> U256 {
        self.output.value
    }

    pub fn tx_hash(&self) -> TxHash {
        self.input.tx_hash
    }

    /// Aggregates are bucketed by the input leg's timestamp.
    pub fn timestamp(&self) -> u64 {
        self.input.timestamp
    }
}

/// Outcome of observing one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Neither side is the router.
    Unrelated,
    /// Inbound leg buffered. `displaced` holds what last-write-wins replaced.
    Stored {
        key: PendingKey,
        displaced: Option<PendingInput>,
    },
    /// Outbound leg consumed a pending input.
    Matched { swap: Swap, consumed_seq: u64 },
    /// Outbound leg with no pending input.
    Unmatched { key: PendingKey },
}

impl Observation {
    pub fn swap(&self) -> Option<&Swap> {
        match self {
            Observation::Matched { swap, .. } => Some(swap),
            _ => None,
        }
    }

    pub fn into_swap(self) -> Option<Swap> {
        match self {
            Observation::Matched { swap, .. } => Some(swap),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Observation::Unrelated => "unrelated",
            Observation::Stored { .. } => "stored",
            Observation::Matched { .. } => "matched",
            Observation::Unmatched { .. } => "unmatched",
        }
    }
}

/// Running counters for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationStats {
    /// Inputs currently buffered.
    pub pending: usize,
    pub stored: u64,
    pub matched: u64,
    pub unmatched: u64,
    /// Inputs overwritten under last-write-wins.
    pub displaced: u64,
    /// Inputs dropped by the eviction policy.
    pub evicted: u64,
    /// Inputs dropped by `discard_from_block`.
    pub discarded: u64,
}
