//! # Integration Flows
//!
//! NDJSON input through the source, the pipeline and the dispatcher into a
//! real entity store, checked by reading the stored rows back.

pub mod ndjson_flows;

#[cfg(feature = "rocksdb")]
pub mod persistence;
