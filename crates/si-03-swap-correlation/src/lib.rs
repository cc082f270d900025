//! # Swap Correlation
//!
//! Detects swaps routed through a single intermediary contract by pairing
//! the inbound leg (`user -> router`) with the outbound leg
//! (`router -> user`) of the same transaction.
//!
//! ## Pending inputs
//!
//! Inbound legs wait in a [`PendingInputStore`] until an outbound leg claims
//! them. An inbound leg whose outbound counterpart never arrives (multi-hop
//! routes, refunds to a different address) stays buffered unless an
//! [`EvictionPolicy`] bounds the map by age or size.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CorrelationEngine::new(CorrelationConfig::default())?;
//! if let Some(swap) = engine.observe(&transfer) {
//!     // fold swap into aggregates
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryPendingInputs;
pub use domain::{
    CorrelationConfig, CorrelationError, CorrelationStats, EvictionPolicy, MatchingPolicy,
    Observation, PendingInput, PendingKey, Swap, DEFAULT_ROUTER,
};
pub use ports::{PendingInputStore, SwapCorrelationApi};
pub use service::CorrelationEngine;
