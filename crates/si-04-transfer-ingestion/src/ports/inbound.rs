use shared_types::{LedgerEvent, TransferEvent};

use crate::domain::{EventOutcome, IngestionError, ReorgReport};

/// Ledger event ingestion.
///
/// Events must arrive one at a time in ledger order. A returned error means
/// the event left no trace; the caller decides whether to halt or retry.
pub trait LedgerIngestionApi {
    fn handle(&mut self, event: LedgerEvent) -> Result<EventOutcome, IngestionError>;

    fn handle_transfer(&mut self, transfer: &TransferEvent) -> Result<EventOutcome, IngestionError>;

    /// The ledger dropped every block from `from_block` onward.
    fn handle_reorg(&mut self, from_block: u64) -> Result<ReorgReport, IngestionError>;
}
