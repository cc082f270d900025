//! # Ledger Event Dispatcher
//!
//! Routes each [`LedgerEvent`] to its handler. Transfers go through the
//! [`TransferIngestionHandler`]; every other event stores a 1:1 record and,
//! for approvals and router swaps, updates the aggregates it touches.

use shared_types::{ApprovalEvent, LedgerEvent, SwappedEvent, TransferEvent};
use si_01_entity_store::{write_op, Entity};
use si_02_aggregates::{
    record_approval_for_asset, record_reported_swap_for_account, record_reported_swap_for_bucket,
    touch_account, AggregateError, AggregateRepository,
};
use si_03_swap_correlation::SwapCorrelationApi;
use tracing::{debug, info, warn};

use super::transfer::{touch, TransferIngestionHandler};
use crate::domain::{
    ApprovalRecord, BitInvalidatorUpdatedRecord, DomainChangedRecord, EpochIncreasedRecord,
    EventOutcome, IngestionError, NonceIncreasedRecord, OrderCancelledRecord, OrderFilledRecord,
    OrderFilledRfqRecord, OwnershipTransferredRecord, PausedRecord, ReorgReport, SwappedRecord,
    UnpausedRecord,
};
use crate::ports::LedgerIngestionApi;

pub struct LedgerEventDispatcher<R, C> {
    transfers: TransferIngestionHandler<R, C>,
}

impl<R: AggregateRepository, C: SwapCorrelationApi> LedgerEventDispatcher<R, C> {
    pub fn new(repository: R, correlation: C) -> Self {
        Self {
            transfers: TransferIngestionHandler::new(repository, correlation),
        }
    }

    pub fn repository(&self) -> &R {
        self.transfers.repository()
    }

    pub fn correlation(&self) -> &C {
        self.transfers.correlation()
    }

    pub fn correlation_mut(&mut self) -> &mut C {
        self.transfers.correlation_mut()
    }

    fn repo(&mut self) -> &mut R {
        self.transfers.repository_mut()
    }

    /// Stage a non-transfer event and commit it, or leave no trace.
    fn apply_record_event(&mut self, event: &LedgerEvent) -> Result<EventOutcome, IngestionError> {
        let result = self
            .stage(event)
            .and_then(|()| self.transfers.commit());

        match result {
            Ok((committed, commit_duration)) => Ok(EventOutcome {
                event: event.name(),
                observation: None,
                swap: None,
                committed,
                commit_duration,
            }),
            Err(err) => {
                warn!(event = event.name(), error = %err, "Event not applied, rolling back");
                self.repo().discard();
                Err(err)
            }
        }
    }

    fn stage(&mut self, event: &LedgerEvent) -> Result<(), IngestionError> {
        match event {
            LedgerEvent::Transfer(_) => Ok(()),
            LedgerEvent::Approval(e) => self.stage_approval(e),
            LedgerEvent::Swapped(e) => self.stage_swapped(e),
            LedgerEvent::OrderFilled(e) => {
                self.stage_record(OrderFilledRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::OrderCancelled(e) => {
                self.stage_record(OrderCancelledRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::OwnershipTransferred(e) => {
                self.stage_record(OwnershipTransferredRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::Paused(e) => self.stage_record(PausedRecord::new(e.meta, e.clone())),
            LedgerEvent::Unpaused(e) => self.stage_record(UnpausedRecord::new(e.meta, e.clone())),
            LedgerEvent::BitInvalidatorUpdated(e) => {
                self.stage_record(BitInvalidatorUpdatedRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::EpochIncreased(e) => {
                self.stage_record(EpochIncreasedRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::DomainChanged(e) => {
                self.stage_record(DomainChangedRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::NonceIncreased(e) => {
                self.stage_record(NonceIncreasedRecord::new(e.meta, e.clone()))
            }
            LedgerEvent::OrderFilledRfq(e) => {
                self.stage_record(OrderFilledRfqRecord::new(e.meta, e.clone()))
            }
        }
    }

    fn stage_approval(&mut self, event: &ApprovalEvent) -> Result<(), IngestionError> {
        let record = ApprovalRecord::new(event.meta, event.clone());
        self.repo().put_record(write_op(&record)?)?;

        touch(self.repo(), event.owner, event.meta.timestamp)?;

        let mut asset = self.repo().get_or_create_asset(event.meta.contract)?;
        record_approval_for_asset(&mut asset);
        self.repo().save_asset(asset)?;
        Ok(())
    }

    fn stage_swapped(&mut self, event: &SwappedEvent) -> Result<(), IngestionError> {
        let timestamp = event.meta.timestamp;

        let mut bucket = self.repo().get_or_create_daily_bucket(timestamp)?;
        record_reported_swap_for_bucket(&mut bucket, event.amount);
        self.repo().save_daily_bucket(bucket)?;

        let record = SwappedRecord::new(event.clone());
        self.repo().put_record(write_op(&record)?)?;

        if !event.sender.is_zero() {
            let mut account = self.repo().get_or_create_account(event.sender)?;
            record_reported_swap_for_account(&mut account, event.amount);
            touch_account(&mut account, timestamp);
            self.repo().save_account(account)?;
        }

        debug!(
            tx = %event.meta.tx_hash.short(),
            sender = %event.sender,
            amount = %event.amount,
            "Router swap recorded"
        );
        Ok(())
    }

    /// Stage a 1:1 event record with no aggregate effect.
    fn stage_record<E: Entity>(&mut self, record: E) -> Result<(), IngestionError> {
        self.repo().put_record(write_op(&record)?)?;
        Ok(())
    }
}

impl<R: AggregateRepository, C: SwapCorrelationApi> LedgerIngestionApi
    for LedgerEventDispatcher<R, C>
{
    fn handle(&mut self, event: LedgerEvent) -> Result<EventOutcome, IngestionError> {
        match &event {
            LedgerEvent::Transfer(transfer) => self.transfers.handle_transfer(transfer),
            _ => self.apply_record_event(&event),
        }
    }

    fn handle_transfer(&mut self, transfer: &TransferEvent) -> Result<EventOutcome, IngestionError> {
        self.transfers.handle_transfer(transfer)
    }

    fn handle_reorg(&mut self, from_block: u64) -> Result<ReorgReport, IngestionError> {
        let pending_discarded = self.correlation_mut().discard_from_block(from_block);

        let aggregates_rewound = match self.repo().reset_block_range(from_block, u64::MAX) {
            Ok(()) => true,
            Err(AggregateError::RollbackUnsupported { .. }) => {
                warn!(
                    from_block,
                    "Aggregates cannot be rewound; rows derived from orphaned blocks remain"
                );
                false
            }
            Err(err) => return Err(err.into()),
        };

        info!(from_block, pending_discarded, aggregates_rewound, "Reorg handled");
        Ok(ReorgReport {
            from_block,
            pending_discarded,
            aggregates_rewound,
        })
    }
}
