//! # Aggregate Entities
//!
//! Derived, monotonically updated summary rows.
//!
//! ## Invariants
//!
//! - Counters are `U256`, never decremented
//! - `first_seen == 0` is the "unset" sentinel and is written exactly once
//! - A row, once created, is never deleted

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{day_start, Address, DecimalU256, U256};
use si_01_entity_store::{Entity, EntityKind};
use std::collections::BTreeSet;

use super::known_assets::known_asset;

/// Per-address activity summary.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Address,
    /// Swaps initiated by this address.
    #[serde_as(as = "DecimalU256")]
    pub total_swaps: U256,
    /// Sum of input-leg amounts across those swaps.
    #[serde_as(as = "DecimalU256")]
    pub total_volume: U256,
    /// Timestamp of the first event touching this account (0 = unset).
    pub first_seen: u64,
    /// Timestamp of the latest event touching this account.
    pub last_seen: u64,
    /// Swaps reported by the router's own `Swapped` log.
    #[serde_as(as = "DecimalU256")]
    pub swap_count: U256,
}

impl Account {
    /// Fresh account: zero counters, unset timestamps.
    pub fn new(id: Address) -> Self {
        Self {
            id,
            total_swaps: U256::zero(),
            total_volume: U256::zero(),
            first_seen: 0,
            last_seen: 0,
            swap_count: U256::zero(),
        }
    }
}

impl Entity for Account {
    const KIND: EntityKind = EntityKind::Account;

    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}

/// Per-token summary.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde_as(as = "DecimalU256")]
    pub total_supply: U256,
    #[serde_as(as = "DecimalU256")]
    pub transfer_count: U256,
    #[serde_as(as = "DecimalU256")]
    pub approval_count: U256,
}

impl Asset {
    /// Fresh asset. Metadata comes from the static registry when the token is
    /// known, otherwise it stays blank for later backfill.
    pub fn new(id: Address) -> Self {
        let (symbol, name, decimals) = match known_asset(&id) {
            Some(meta) => (meta.symbol.to_string(), meta.name.to_string(), meta.decimals),
            None => (String::new(), String::new(), 0),
        };
        Self {
            id,
            symbol,
            name,
            decimals,
            total_supply: U256::zero(),
            transfer_count: U256::zero(),
            approval_count: U256::zero(),
        }
    }

    pub fn has_metadata(&self) -> bool {
        !self.symbol.is_empty()
    }
}

impl Entity for Asset {
    const KIND: EntityKind = EntityKind::Asset;

    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}

/// Per-day summary keyed by the day's start timestamp.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// `floor(ts / 86400) * 86400`.
    pub id: u64,
    /// Same value as `id`, kept as a separate field for consumers.
    pub date: u64,
    #[serde_as(as = "DecimalU256")]
    pub total_volume: U256,
    #[serde_as(as = "DecimalU256")]
    pub swap_count: U256,
    /// Approximate mode: +1 per swap. Distinct mode: `seen_users.len()`.
    #[serde_as(as = "DecimalU256")]
    pub unique_users: U256,
    /// Only populated in distinct mode.
    pub seen_users: BTreeSet<Address>,
}

impl DailyBucket {
    /// Fresh bucket for the day containing `timestamp`.
    pub fn for_timestamp(timestamp: u64) -> Self {
        let day = day_start(timestamp);
        Self {
            id: day,
            date: day,
            total_volume: U256::zero(),
            swap_count: U256::zero(),
            unique_users: U256::zero(),
            seen_users: BTreeSet::new(),
        }
    }

    /// Store key: day start as a decimal string.
    pub fn key_for(timestamp: u64) -> String {
        day_start(timestamp).to_string()
    }
}

impl Entity for DailyBucket {
    const KIND: EntityKind = EntityKind::DailyBucket;

    fn entity_id(&self) -> String {
        self.id.to_string()
    }
}
