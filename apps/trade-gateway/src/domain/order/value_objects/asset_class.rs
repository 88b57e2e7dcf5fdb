//! Asset class of an order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::order::InvalidOrderIntent;

/// Asset class routed to the broker as the `class` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Listed equity.
    Equity,
    /// Listed option contract.
    Option,
}

impl AssetClass {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Option => "option",
        }
    }
}

impl FromStr for AssetClass {
    type Err = InvalidOrderIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equity" => Ok(Self::Equity),
            "option" => Ok(Self::Option),
            _ => Err(InvalidOrderIntent::unknown("asset class", s)),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
