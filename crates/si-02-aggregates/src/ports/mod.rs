//! # Ports Layer
//!
//! The repository port. `get_or_create_*` and `save_*` are separate so a
//! caller can load several rows, mutate them, and stage them for one commit.

use shared_types::Address;
use si_01_entity_store::WriteOp;

use crate::domain::{Account, AggregateConfig, AggregateError, Asset, DailyBucket};

/// Rows written by one [`AggregateRepository::commit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub accounts: usize,
    pub assets: usize,
    pub buckets: usize,
    pub records: usize,
}

impl CommitSummary {
    pub fn total(&self) -> usize {
        self.accounts + self.assets + self.buckets + self.records
    }
}

/// Unit-of-work access to the aggregate rows.
///
/// Reads observe staged values first: two `get_or_create` calls for the same
/// id before a commit return the same in-progress row.
pub trait AggregateRepository {
    fn config(&self) -> &AggregateConfig;

    fn get_or_create_account(&mut self, address: Address) -> Result<Account, AggregateError>;
    fn save_account(&mut self, account: Account) -> Result<(), AggregateError>;

    fn get_or_create_asset(&mut self, address: Address) -> Result<Asset, AggregateError>;
    fn save_asset(&mut self, asset: Asset) -> Result<(), AggregateError>;

    /// Bucket for the day containing `timestamp`.
    fn get_or_create_daily_bucket(&mut self, timestamp: u64)
        -> Result<DailyBucket, AggregateError>;
    fn save_daily_bucket(&mut self, bucket: DailyBucket) -> Result<(), AggregateError>;

    /// Stage an immutable per-event record (transfer, approval, ...).
    fn put_record(&mut self, op: WriteOp) -> Result<(), AggregateError>;

    /// Persist everything staged as one atomic batch.
    ///
    /// Staged state is cleared whether or not the write succeeds.
    fn commit(&mut self) -> Result<CommitSummary, AggregateError>;

    /// Drop everything staged since the last commit.
    fn discard(&mut self);

    /// Rewind aggregates for a block range.
    fn reset_block_range(&mut self, from_block: u64, to_block: u64) -> Result<(), AggregateError> {
        Err(AggregateError::RollbackUnsupported {
            from_block,
            to_block,
        })
    }
}
