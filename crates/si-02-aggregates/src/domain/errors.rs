use si_01_entity_store::StoreError;
use thiserror::Error;

/// Aggregate repository errors.
#[derive(Debug, Clone, Error)]
pub enum AggregateError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Aggregates are monotonic folds; they cannot be rewound to an earlier block.
    #[error("Rollback of aggregates for blocks {from_block}..={to_block} is not supported")]
    RollbackUnsupported { from_block: u64, to_block: u64 },
}
