//! # Transfer Ingestion Handler
//!
//! Per transfer:
//! 1. Feed the correlation engine
//! 2. On a completed swap, credit the initiator and the input leg's day
//! 3. Touch `from` and `to` (the zero address is skipped)
//! 4. Get-or-create the asset, count the transfer, store the record
//! 5. Commit everything as one batch
//!
//! If any step fails the staged rows are discarded and the correlation
//! change is reverted before the error is returned.

use shared_types::{Address, TransferEvent};
use si_01_entity_store::write_op;
use si_02_aggregates::{
    record_swap_for_account, record_swap_for_bucket, record_transfer_for_asset, touch_account,
    AggregateRepository, CommitSummary,
};
use si_03_swap_correlation::{Swap, SwapCorrelationApi};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::domain::{EventOutcome, IngestionError, TransferRecord};

pub struct TransferIngestionHandler<R, C> {
    repository: R,
    correlation: C,
}

impl<R: AggregateRepository, C: SwapCorrelationApi> TransferIngestionHandler<R, C> {
    pub fn new(repository: R, correlation: C) -> Self {
        Self {
            repository,
            correlation,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn correlation(&self) -> &C {
        &self.correlation
    }

    pub fn correlation_mut(&mut self) -> &mut C {
        &mut self.correlation
    }

    pub fn handle_transfer(
        &mut self,
        transfer: &TransferEvent,
    ) -> Result<EventOutcome, IngestionError> {
        let observation = self.correlation.observe_detailed(transfer);
        let label = observation.label();

        let result = self
            .apply(transfer, observation.swap())
            .and_then(|()| self.commit());

        match result {
            Ok((committed, commit_duration)) => Ok(EventOutcome {
                event: "transfer",
                observation: Some(label),
                swap: observation.into_swap(),
                committed,
                commit_duration,
            }),
            Err(err) => {
                warn!(
                    tx = %transfer.tx_hash.short(),
                    log_index = transfer.log_index,
                    error = %err,
                    "Transfer not applied, rolling back"
                );
                self.repository.discard();
                self.correlation.revert(observation);
                Err(err)
            }
        }
    }

    fn apply(&mut self, transfer: &TransferEvent, swap: Option<&Swap>) -> Result<(), IngestionError> {
        if let Some(swap) = swap {
            self.apply_swap(swap)?;
        }

        touch(&mut self.repository, transfer.from, transfer.timestamp)?;
        if transfer.to != transfer.from {
            touch(&mut self.repository, transfer.to, transfer.timestamp)?;
        }

        let mut asset = self.repository.get_or_create_asset(transfer.asset)?;
        record_transfer_for_asset(&mut asset);
        self.repository.save_asset(asset)?;

        let record = TransferRecord::new(transfer.meta(), transfer.clone());
        self.repository.put_record(write_op(&record)?)?;

        trace!(
            tx = %transfer.tx_hash.short(),
            from = %transfer.from,
            to = %transfer.to,
            "Transfer staged"
        );
        Ok(())
    }

    fn apply_swap(&mut self, swap: &Swap) -> Result<(), IngestionError> {
        let initiator = swap.initiator();
        let amount = swap.amount_in();

        if !initiator.is_zero() {
            let mut account = self.repository.get_or_create_account(initiator)?;
            record_swap_for_account(&mut account, amount);
            self.repository.save_account(account)?;
        }

        let mode = self.repository.config().unique_users;
        let mut bucket = self.repository.get_or_create_daily_bucket(swap.timestamp())?;
        record_swap_for_bucket(&mut bucket, amount, initiator, mode);
        self.repository.save_daily_bucket(bucket)?;

        debug!(
            tx = %swap.tx_hash().short(),
            initiator = %initiator,
            amount_in = %amount,
            amount_out = %swap.amount_out(),
            "Swap detected"
        );
        Ok(())
    }

    /// Commit staged rows, timing the store write.
    pub(crate) fn commit(&mut self) -> Result<(CommitSummary, Duration), IngestionError> {
        let started = Instant::now();
        let committed = self.repository.commit()?;
        Ok((committed, started.elapsed()))
    }
}

/// `touch_account` on a non-zero address, staged for commit.
pub(crate) fn touch<R: AggregateRepository>(
    repository: &mut R,
    address: Address,
    timestamp: u64,
) -> Result<(), IngestionError> {
    if address.is_zero() {
        return Ok(());
    }
    let mut account = repository.get_or_create_account(address)?;
    touch_account(&mut account, timestamp);
    repository.save_account(account)?;
    Ok(())
}
