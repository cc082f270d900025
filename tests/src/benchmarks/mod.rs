//! # Stress Tests
//!
//! Large-volume runs per subsystem. These assert on correctness at scale and
//! on coarse time bounds; precise numbers live in `benches/`.

pub mod si_03_correlation;
pub mod si_04_ingestion;
