//! # Transfer Ingestion
//!
//! Entry point for ledger events. Each event is processed completely before
//! the next: correlation, aggregate updates, record storage, then a single
//! atomic commit.
//!
//! ## Failure semantics
//!
//! Nothing is retried. A failed event leaves no rows behind and no change in
//! the pending-input map, so the caller can halt or resubmit it.
//!
//! ## Replay
//!
//! Processing the same event twice counts it twice. Callers that resume from
//! a checkpoint must not overlap already-processed events.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    ApprovalRecord, BitInvalidatorUpdatedRecord, DomainChangedRecord, EpochIncreasedRecord,
    EventOutcome, IngestionError, NonceIncreasedRecord, OrderCancelledRecord, OrderFilledRecord,
    OrderFilledRfqRecord, OwnershipTransferredRecord, PausedRecord, ReorgReport, SwappedRecord,
    TransferRecord, UnpausedRecord,
};
pub use ports::LedgerIngestionApi;
pub use service::{LedgerEventDispatcher, TransferIngestionHandler};
