//! How long an order stays working.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::order::InvalidOrderIntent;

/// Order duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDuration {
    /// Valid for the current trading day.
    #[default]
    Day,
    /// Good till canceled.
    Gtc,
    /// Pre-market session only.
    Pre,
    /// Post-market session only.
    Post,
}

impl OrderDuration {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Gtc => "gtc",
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

impl FromStr for OrderDuration {
    type Err = InvalidOrderIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "gtc" => Ok(Self::Gtc),
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            _ => Err(InvalidOrderIntent::unknown("duration", s)),
        }
    }
}

impl fmt::Display for OrderDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
