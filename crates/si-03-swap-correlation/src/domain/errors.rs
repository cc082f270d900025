use thiserror::Error;

/// Correlation engine configuration errors.
///
/// `observe` itself cannot fail: a lookup miss is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelationError {
    #[error("Router address must not be the zero address")]
    ZeroRouter,

    #[error("Unknown matching policy '{0}' (expected last-write-wins or fifo)")]
    UnknownPolicy(String),

    #[error("Invalid eviction policy: {0}")]
    InvalidEviction(String),
}
