//! # Service Layer
//!
//! - `transfer.rs` - correlation plus aggregate updates for one transfer
//! - `dispatcher.rs` - routing for every ledger event kind

pub mod dispatcher;
pub mod transfer;

pub use dispatcher::LedgerEventDispatcher;
pub use transfer::TransferIngestionHandler;
