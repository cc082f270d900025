use si_01_entity_store::StoreError;
use si_02_aggregates::AggregateError;
use thiserror::Error;

/// Failure while processing one ledger event.
///
/// Every variant means nothing derived from the event was persisted.
#[derive(Debug, Clone, Error)]
pub enum IngestionError {
    #[error("Aggregate update failed: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Record write failed: {0}")]
    Store(#[from] StoreError),
}

impl IngestionError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Aggregate(AggregateError::Store(StoreError::Codec { .. }))
            | Self::Store(StoreError::Codec { .. }) => "codec",
            Self::Aggregate(AggregateError::RollbackUnsupported { .. }) => "rollback",
            Self::Aggregate(AggregateError::Store(_)) | Self::Store(_) => "store",
        }
    }
}
