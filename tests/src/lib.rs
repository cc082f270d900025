//! # Swap Indexer Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Stress tests per subsystem
//! │   ├── si_03_correlation.rs
//! │   └── si_04_ingestion.rs
//! │
//! ├── fixtures.rs       # Event builders and NDJSON lines
//! │
//! └── integration/      # NDJSON → pipeline → entity store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p si-tests
//!
//! # RocksDB persistence flows
//! cargo test -p si-tests --features rocksdb
//!
//! # Benchmarks
//! cargo bench -p si-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
