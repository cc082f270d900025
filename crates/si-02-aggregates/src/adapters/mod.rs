//! Adapters for the AggregateRepository port.

pub mod staged;

pub use staged::StagedAggregateRepository;
