//! # Staged Aggregate Repository
//!
//! Unit-of-work implementation of [`AggregateRepository`] over any
//! [`EntityStore`]. Mutated rows are held in memory until `commit`, which
//! hands every row to the store as a single atomic batch.

use shared_types::Address;
use si_01_entity_store::{load_entity, write_op, EntityStore, WriteOp};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::domain::{Account, AggregateConfig, AggregateError, Asset, DailyBucket};
use crate::ports::{AggregateRepository, CommitSummary};

pub struct StagedAggregateRepository<S: EntityStore> {
    store: S,
    config: AggregateConfig,
    accounts: BTreeMap<Address, Account>,
    assets: BTreeMap<Address, Asset>,
    buckets: BTreeMap<u64, DailyBucket>,
    records: Vec<WriteOp>,
}

impl<S: EntityStore> StagedAggregateRepository<S> {
    pub fn new(store: S, config: AggregateConfig) -> Self {
        Self {
            store,
            config,
            accounts: BTreeMap::new(),
            assets: BTreeMap::new(),
            buckets: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of rows waiting for the next commit.
    pub fn staged_len(&self) -> usize {
        self.accounts.len() + self.assets.len() + self.buckets.len() + self.records.len()
    }

    /// Committed account, ignoring anything staged.
    pub fn load_account(&self, address: &Address) -> Result<Option<Account>, AggregateError> {
        Ok(load_entity(&self.store, &address.to_hex())?)
    }

    /// Committed asset, ignoring anything staged.
    pub fn load_asset(&self, address: &Address) -> Result<Option<Asset>, AggregateError> {
        Ok(load_entity(&self.store, &address.to_hex())?)
    }

    /// Committed bucket for the day containing `timestamp`.
    pub fn load_daily_bucket(&self, timestamp: u64) -> Result<Option<DailyBucket>, AggregateError> {
        Ok(load_entity(&self.store, &DailyBucket::key_for(timestamp))?)
    }

    fn drain_ops(&mut self) -> Result<(Vec<WriteOp>, CommitSummary), AggregateError> {
        let accounts = std::mem::take(&mut self.accounts);
        let assets = std::mem::take(&mut self.assets);
        let buckets = std::mem::take(&mut self.buckets);
        let records = std::mem::take(&mut self.records);

        let summary = CommitSummary {
            accounts: accounts.len(),
            assets: assets.len(),
            buckets: buckets.len(),
            records: records.len(),
        };

        let mut ops = Vec::with_capacity(summary.total());
        for account in accounts.values() {
            ops.push(write_op(account)?);
        }
        for asset in assets.values() {
            ops.push(write_op(asset)?);
        }
        for bucket in buckets.values() {
            ops.push(write_op(bucket)?);
        }
        ops.extend(records);

        Ok((ops, summary))
    }
}

impl<S: EntityStore> AggregateRepository for StagedAggregateRepository<S> {
    fn config(&self) -> &AggregateConfig {
        &self.config
    }

    fn get_or_create_account(&mut self, address: Address) -> Result<Account, AggregateError> {
        if let Some(account) = self.accounts.get(&address) {
            return Ok(account.clone());
        }
        match load_entity::<Account, _>(&self.store, &address.to_hex())? {
            Some(account) => Ok(account),
            None => {
                trace!(account = %address, "Creating account");
                let account = Account::new(address);
                self.accounts.insert(address, account.clone());
                Ok(account)
            }
        }
    }

    fn save_account(&mut self, account: Account) -> Result<(), AggregateError> {
        self.accounts.insert(account.id, account);
        Ok(())
    }

    fn get_or_create_asset(&mut self, address: Address) -> Result<Asset, AggregateError> {
        if let Some(asset) = self.assets.get(&address) {
            return Ok(asset.clone());
        }
        match load_entity::<Asset, _>(&self.store, &address.to_hex())? {
            Some(asset) => Ok(asset),
            None => {
                let asset = Asset::new(address);
                trace!(asset = %address, known = asset.has_metadata(), "Creating asset");
                self.assets.insert(address, asset.clone());
                Ok(asset)
            }
        }
    }

    fn save_asset(&mut self, asset: Asset) -> Result<(), AggregateError> {
        self.assets.insert(asset.id, asset);
        Ok(())
    }

    fn get_or_create_daily_bucket(
        &mut self,
        timestamp: u64,
    ) -> Result<DailyBucket, AggregateError> {
        let fresh = DailyBucket::for_timestamp(timestamp);
        if let Some(bucket) = self.buckets.get(&fresh.id) {
            return Ok(bucket.clone());
        }
        match load_entity::<DailyBucket, _>(&self.store, &fresh.id.to_string())? {
            Some(bucket) => Ok(bucket),
            None => {
                trace!(day = fresh.id, "Creating daily bucket");
                self.buckets.insert(fresh.id, fresh.clone());
                Ok(fresh)
            }
        }
    }

    fn save_daily_bucket(&mut self, bucket: DailyBucket) -> Result<(), AggregateError> {
        self.buckets.insert(bucket.id, bucket);
        Ok(())
    }

    fn put_record(&mut self, op: WriteOp) -> Result<(), AggregateError> {
        self.records.push(op);
        Ok(())
    }

    fn commit(&mut self) -> Result<CommitSummary, AggregateError> {
        let (ops, summary) = self.drain_ops()?;
        if ops.is_empty() {
            return Ok(summary);
        }

        self.store.write_batch(ops)?;
        debug!(
            accounts = summary.accounts,
            assets = summary.assets,
            buckets = summary.buckets,
            records = summary.records,
            "Committed aggregate batch"
        );
        Ok(summary)
    }

    fn discard(&mut self) {
        let dropped = self.staged_len();
        self.accounts.clear();
        self.assets.clear();
        self.buckets.clear();
        self.records.clear();
        if dropped > 0 {
            debug!(dropped, "Discarded staged aggregate rows");
        }
    }
}
