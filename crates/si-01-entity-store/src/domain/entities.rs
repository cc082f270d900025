//! # Store Keys
//!
//! Every stored row is addressed by an [`EntityKind`] plus a string id.
//! Ids are canonical strings: lowercase `0x` hex for addresses, decimal for
//! day buckets, `<tx_hash>-<log_index>` for event records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named collections in the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    // Aggregates (mutable, never deleted)
    Account,
    Asset,
    DailyBucket,
    // Event records (written once)
    Transfer,
    Approval,
    Swapped,
    OrderFilled,
    OrderCancelled,
    OwnershipTransferred,
    Paused,
    Unpaused,
    BitInvalidatorUpdated,
    EpochIncreased,
    DomainChanged,
    NonceIncreased,
    OrderFilledRfq,
}

impl EntityKind {
    /// All kinds, in column-family order.
    pub const ALL: [EntityKind; 16] = [
        EntityKind::Account,
        EntityKind::Asset,
        EntityKind::DailyBucket,
        EntityKind::Transfer,
        EntityKind::Approval,
        EntityKind::Swapped,
        EntityKind::OrderFilled,
        EntityKind::OrderCancelled,
        EntityKind::OwnershipTransferred,
        EntityKind::Paused,
        EntityKind::Unpaused,
        EntityKind::BitInvalidatorUpdated,
        EntityKind::EpochIncreased,
        EntityKind::DomainChanged,
        EntityKind::NonceIncreased,
        EntityKind::OrderFilledRfq,
    ];

    /// Collection name (also the RocksDB column family).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Asset => "asset",
            Self::DailyBucket => "daily_bucket",
            Self::Transfer => "transfer",
            Self::Approval => "approval",
            Self::Swapped => "swapped",
            Self::OrderFilled => "order_filled",
            Self::OrderCancelled => "order_cancelled",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Paused => "paused",
            Self::Unpaused => "unpaused",
            Self::BitInvalidatorUpdated => "bit_invalidator_updated",
            Self::EpochIncreased => "epoch_increased",
            Self::DomainChanged => "eip712_domain_changed",
            Self::NonceIncreased => "nonce_increased",
            Self::OrderFilledRfq => "order_filled_rfq",
        }
    }

    /// Aggregates are the rows that get updated in place.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Account | Self::Asset | Self::DailyBucket)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upsert inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOp {
    pub kind: EntityKind,
    pub id: String,
    pub value: Vec<u8>,
}

impl WriteOp {
    pub fn new(kind: EntityKind, id: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            kind,
            id: id.into(),
            value,
        }
    }
}
