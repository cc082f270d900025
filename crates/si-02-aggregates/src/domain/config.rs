use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How `DailyBucket::unique_users` is maintained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UniqueUsersMode {
    /// `+1` per swap. O(1) per bucket, over-counts repeat users.
    #[default]
    Approximate,
    /// True distinct count backed by a per-bucket address set.
    Distinct,
}

impl UniqueUsersMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approximate => "approximate",
            Self::Distinct => "distinct",
        }
    }
}

impl fmt::Display for UniqueUsersMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniqueUsersMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approximate" => Ok(Self::Approximate),
            "distinct" => Ok(Self::Distinct),
            other => Err(format!("unknown unique-users mode '{}'", other)),
        }
    }
}

/// Aggregate repository configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    pub unique_users: UniqueUsersMode,
}
