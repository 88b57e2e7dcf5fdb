//! Trading session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::order::InvalidOrderIntent;

/// Trading session requested for the order.
///
/// Sent on the wire as `REG` or `EXT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    /// Regular market hours.
    #[default]
    #[serde(rename = "REG")]
    Regular,
    /// Pre- and post-market hours.
    #[serde(rename = "EXT")]
    Extended,
}

impl Session {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REG",
            Self::Extended => "EXT",
        }
    }
}

impl FromStr for Session {
    type Err = InvalidOrderIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" | "reg" => Ok(Self::Regular),
            "extended" | "ext" => Ok(Self::Extended),
            _ => Err(InvalidOrderIntent::unknown("session", s)),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Extended => write!(f, "extended"),
        }
    }
}
