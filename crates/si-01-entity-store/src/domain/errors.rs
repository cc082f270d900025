use super::EntityKind;
use thiserror::Error;

/// Failures surfaced by an entity store backend.
///
/// Every variant is fatal for the event being processed; the store never
/// retries on its own.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Codec error for {kind} '{id}': {message}")]
    Codec {
        kind: EntityKind,
        id: String,
        message: String,
    },

    #[error("Column family missing: {0}")]
    MissingColumnFamily(&'static str),
}
