//! Serde adapters for ledger amounts.
//!
//! Amounts are serialized as base-10 strings so they survive JSON consumers
//! that cannot hold 256-bit integers. Parsing also accepts `0x` hex.

use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

use crate::entities::U256;
use crate::errors::ParseError;

/// Parse a decimal (or `0x` hex) amount.
pub fn parse_amount(s: &str) -> Result<U256, ParseError> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return U256::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidAmount(s.to_string()));
    }
    U256::from_dec_str(s).map_err(|_| ParseError::InvalidAmount(s.to_string()))
}

/// `serde_as` adapter: U256 as a base-10 string.
///
/// `DisplayFromStr` does not fit here because `U256::from_str` parses hex.
///
/// ```rust,ignore
/// #[serde_as]
/// #[derive(Serialize, Deserialize)]
/// struct Fill {
///     #[serde_as(as = "DecimalU256")]
///     amount: U256,
/// }
/// ```
pub struct DecimalU256;

impl SerializeAs<U256> for DecimalU256 {
    fn serialize_as<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}

impl<'de> DeserializeAs<'de, U256> for DecimalU256 {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_amount(&s).map_err(serde::de::Error::custom)
    }
}
