use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;
use std::str::FromStr;

use super::CorrelationError;

/// Aggregation router v6 (0x111111125421cA6dc452d289314280a0f8842A65).
pub const DEFAULT_ROUTER: Address = Address([
    0x11, 0x11, 0x11, 0x12, 0x54, 0x21, 0xca, 0x6d, 0xc4, 0x52, 0xd2, 0x89, 0x31, 0x42, 0x80,
    0xa0, 0xf8, 0x84, 0x2a, 0x65,
]);

/// What happens when two inbound legs share a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingPolicy {
    /// The later leg replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Legs queue up; each outbound leg consumes the oldest.
    Fifo,
}

impl MatchingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastWriteWins => "last-write-wins",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for MatchingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchingPolicy {
    type Err = CorrelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-write-wins" | "lww" => Ok(Self::LastWriteWins),
            "fifo" => Ok(Self::Fifo),
            other => Err(CorrelationError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Bounds on the pending map. Both limits are off by default, which leaves
/// unmatched inputs buffered forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionPolicy {
    /// Drop inputs more than this many blocks older than the newest block seen.
    pub max_age_blocks: Option<u64>,
    /// Drop the oldest inputs beyond this many.
    pub max_pending: Option<usize>,
}

impl EvictionPolicy {
    pub fn is_enabled(&self) -> bool {
        self.max_age_blocks.is_some() || self.max_pending.is_some()
    }
}

/// Correlation engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationConfig {
    pub router: Address,
    pub policy: MatchingPolicy,
    pub eviction: EvictionPolicy,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            router: DEFAULT_ROUTER,
            policy: MatchingPolicy::default(),
            eviction: EvictionPolicy::default(),
        }
    }
}

impl CorrelationConfig {
    pub fn validate(&self) -> Result<(), CorrelationError> {
        if self.router.is_zero() {
            return Err(CorrelationError::ZeroRouter);
        }
        if self.eviction.max_pending == Some(0) {
            return Err(CorrelationError::InvalidEviction(
                "max_pending must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_router_address() {
        let parsed: Address = "0x111111125421cA6dc452d289314280a0f8842A65".parse().unwrap();
        assert_eq!(parsed, DEFAULT_ROUTER);
        assert!(CorrelationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_router_rejected() {
        let config = CorrelationConfig {
            router: Address::default(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CorrelationError::ZeroRouter)));
    }

    #[test]
    fn test_zero_max_pending_rejected() {
        let config = CorrelationConfig {
            eviction: EvictionPolicy {
                max_age_blocks: None,
                max_pending: Some(0),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CorrelationError::InvalidEviction(_))
        ));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("fifo".parse::<MatchingPolicy>().unwrap(), MatchingPolicy::Fifo);
        assert_eq!(
            "Last-Write-Wins".parse::<MatchingPolicy>().unwrap(),
            MatchingPolicy::LastWriteWins
        );
        assert!("random".parse::<MatchingPolicy>().is_err());
        assert!(!EvictionPolicy::default().is_enabled());
    }
}
