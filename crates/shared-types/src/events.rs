//! # Ledger Events
//!
//! Inputs delivered by the indexer, one per ledger log, in ledger order.
//!
//! `TransferEvent` is the only event with derived computation behind it.
//! Every other variant of [`LedgerEvent`] maps 1:1 onto a stored record.
//!
//! ## Wire Format
//!
//! NDJSON, internally tagged by `"event"`:
//!
//! ```text
//! {"event":"Transfer","from":"0x..","to":"0x..","value":"100","asset":"0x..",
//!  "tx_hash":"0x..","block_number":18000000,"timestamp":1700000000,"log_index":3}
//! ```

use serde::{Deserialize, Serialize};

use crate::entities::{Address, TxHash, U256};
use serde_with::serde_as;

use crate::serde_helpers::DecimalU256;

/// 32-byte order identifiers share the hash encoding.
pub type OrderHash = TxHash;

/// Position of a log in the ledger plus the emitting contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Contract that emitted the log.
    pub contract: Address,
    pub tx_hash: TxHash,
    pub log_index: u64,
    pub block_number: u64,
    /// Block timestamp (unix seconds).
    pub timestamp: u64,
}

impl EventMeta {
    /// Record id used by every 1:1 event record: `<tx_hash>-<log_index>`.
    pub fn record_id(&self) -> String {
        format!("{}-{}", self.tx_hash.to_hex(), self.log_index)
    }
}

/// A token transfer. Immutable once produced by the ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    #[serde_as(as = "DecimalU256")]
    pub value: U256,
    /// Token contract that emitted the transfer.
    pub asset: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub log_index: u64,
}

impl TransferEvent {
    pub fn meta(&self) -> EventMeta {
        EventMeta {
            contract: self.asset,
            tx_hash: self.tx_hash,
            log_index: self.log_index,
            block_number: self.block_number,
            timestamp: self.timestamp,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    #[serde_as(as = "DecimalU256")]
    pub value: U256,
    pub meta: EventMeta,
}

/// Swap reported directly by the router contract.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwappedEvent {
    pub sender: Address,
    pub src_receiver: Address,
    pub dst_receiver: Address,
    pub src_token: Address,
    pub dst_token: Address,
    #[serde_as(as = "DecimalU256")]
    pub amount: U256,
    #[serde_as(as = "DecimalU256")]
    pub amount_received: U256,
    pub meta: EventMeta,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    /// Present for limit-order-protocol fills, absent for router fills.
    #[serde(default)]
    pub maker: Option<Address>,
    pub order_hash: OrderHash,
    #[serde_as(as = "DecimalU256")]
    pub remaining_amount: U256,
    pub meta: EventMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub order_hash: OrderHash,
    pub meta: EventMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub meta: EventMeta,
}

/// `Paused` / `Unpaused` share a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseEvent {
    pub account: Address,
    pub meta: EventMeta,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitInvalidatorUpdatedEvent {
    pub maker: Address,
    #[serde_as(as = "DecimalU256")]
    pub slot_index: U256,
    #[serde_as(as = "DecimalU256")]
    pub slot_value: U256,
    pub meta: EventMeta,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochIncreasedEvent {
    pub maker: Address,
    #[serde_as(as = "DecimalU256")]
    pub series: U256,
    #[serde_as(as = "DecimalU256")]
    pub new_epoch: U256,
    pub meta: EventMeta,
}

/// The router's EIP-712 signing domain changed. No payload beyond the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainChangedEvent {
    pub meta: EventMeta,
}

/// Limit-order-protocol maker nonce bump.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceIncreasedEvent {
    pub maker: Address,
    #[serde_as(as = "DecimalU256")]
    pub new_nonce: U256,
    pub meta: EventMeta,
}

/// Limit-order-protocol RFQ fill.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilledRfqEvent {
    pub order_hash: OrderHash,
    #[serde_as(as = "DecimalU256")]
    pub making_amount: U256,
    pub meta: EventMeta,
}

/// Every ledger action the indexer ingests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
    Swapped(SwappedEvent),
    OrderFilled(OrderFilledEvent),
    OrderCancelled(OrderCancelledEvent),
    OwnershipTransferred(OwnershipTransferredEvent),
    Paused(PauseEvent),
    Unpaused(PauseEvent),
    BitInvalidatorUpdated(BitInvalidatorUpdatedEvent),
    EpochIncreased(EpochIncreasedEvent),
    #[serde(rename = "EIP712DomainChanged")]
    DomainChanged(DomainChangedEvent),
    NonceIncreased(NonceIncreasedEvent),
    #[serde(rename = "OrderFilledRFQ")]
    OrderFilledRfq(OrderFilledRfqEvent),
}

impl LedgerEvent {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::Approval(_) => "approval",
            Self::Swapped(_) => "swapped",
            Self::OrderFilled(_) => "order_filled",
            Self::OrderCancelled(_) => "order_cancelled",
            Self::OwnershipTransferred(_) => "ownership_transferred",
            Self::Paused(_) => "paused",
            Self::Unpaused(_) => "unpaused",
            Self::BitInvalidatorUpdated(_) => "bit_invalidator_updated",
            Self::EpochIncreased(_) => "epoch_increased",
            Self::DomainChanged(_) => "eip712_domain_changed",
            Self::NonceIncreased(_) => "nonce_increased",
            Self::OrderFilledRfq(_) => "order_filled_rfq",
        }
    }

    pub fn meta(&self) -> EventMeta {
        match self {
            Self::Transfer(e) => e.meta(),
            Self::Approval(e) => e.meta,
            Self::Swapped(e) => e.meta,
            Self::OrderFilled(e) => e.meta,
            Self::OrderCancelled(e) => e.meta,
            Self::OwnershipTransferred(e) => e.meta,
            Self::Paused(e) | Self::Unpaused(e) => e.meta,
            Self::BitInvalidatorUpdated(e) => e.meta,
            Self::EpochIncreased(e) => e.meta,
            Self::DomainChanged(e) => e.meta,
            Self::NonceIncreased(e) => e.meta,
            Self::OrderFilledRfq(e) => e.meta,
        }
    }

    pub fn block_number(&self) -> u64 {
        self.meta().block_number
    }
}
