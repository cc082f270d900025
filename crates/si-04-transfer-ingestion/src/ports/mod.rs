//! # Ports Layer
//!
//! Ingestion drives two outbound ports owned by sibling crates:
//! `AggregateRepository` (si-02) and `SwapCorrelationApi` (si-03). The only
//! port defined here is the inbound API.

pub mod inbound;

pub use inbound::*;
