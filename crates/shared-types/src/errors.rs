//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while parsing ledger identifiers and amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Wrong number of hex digits.
    #[error("Invalid length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Non-hex characters.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Amount is not a base-10 unsigned integer that fits in 256 bits.
    #[error("Invalid decimal amount: {0}")]
    InvalidAmount(String),
}
