//! # Shared Types Crate
//!
//! Ledger primitives and event payloads shared by every indexer subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Canonical Encoding**: Addresses and hashes render as lowercase `0x` hex;
//!   amounts are `U256` carried as decimal strings.
//! - **Immutable Inputs**: Ledger events are never mutated after delivery.

pub mod entities;
pub mod errors;
pub mod events;
pub mod serde_helpers;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use serde_helpers::{parse_amount, DecimalU256};
