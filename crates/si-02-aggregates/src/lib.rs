//! # Aggregate Repository
//!
//! Maintains per-account, per-asset and per-day summaries.
//!
//! ## Role in System
//!
//! - Consumes swap facts and per-event touches from the ingestion handler
//! - Stages all rows touched by one event and commits them as one batch
//! - Never deletes a row or decreases a counter
//!
//! ## Unique users
//!
//! `DailyBucket::unique_users` is an approximation by default (+1 per swap).
//! [`UniqueUsersMode::Distinct`] keeps a per-bucket address set instead, which
//! costs O(active users per day) per bucket.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::StagedAggregateRepository;
pub use domain::{
    known_asset, record_approval_for_asset, record_reported_swap_for_account,
    record_reported_swap_for_bucket, record_swap_for_account, record_swap_for_bucket,
    record_transfer_for_asset, touch_account, Account, AggregateConfig, AggregateError, Asset,
    AssetMetadata, DailyBucket, UniqueUsersMode, ONE_INCH_TOKEN,
};
pub use ports::{AggregateRepository, CommitSummary};
