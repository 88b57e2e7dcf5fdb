//! Order side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AssetClass;
use crate::domain::order::InvalidOrderIntent;

/// Order side in the broker's vocabulary.
///
/// Equities use `buy`, `sell`, `buy_to_cover` and `sell_short`. Options use
/// the open/close forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy shares.
    Buy,
    /// Sell shares.
    Sell,
    /// Buy shares to close a short.
    BuyToCover,
    /// Sell shares short.
    SellShort,
    /// Buy contracts to open a long position.
    BuyToOpen,
    /// Buy contracts to close a short position.
    BuyToClose,
    /// Sell contracts to open a short position.
    SellToOpen,
    /// Sell contracts to close a long position.
    SellToClose,
}

impl OrderSide {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::BuyToCover => "buy_to_cover",
            Self::SellShort => "sell_short",
            Self::BuyToOpen => "buy_to_open",
            Self::BuyToClose => "buy_to_close",
            Self::SellToOpen => "sell_to_open",
            Self::SellToClose => "sell_to_close",
        }
    }

    /// Whether the broker accepts this side for the asset class.
    #[must_use]
    pub const fn is_valid_for(&self, asset_class: AssetClass) -> bool {
        match asset_class {
            AssetClass::Equity => matches!(
                self,
                Self::Buy | Self::Sell | Self::BuyToCover | Self::SellShort
            ),
            AssetClass::Option => matches!(
                self,
                Self::BuyToOpen | Self::BuyToClose | Self::SellToOpen | Self::SellToClose
            ),
        }
    }
}

impl FromStr for OrderSide {
    type Err = InvalidOrderIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "buy_to_cover" => Ok(Self::BuyToCover),
            "sell_short" => Ok(Self::SellShort),
            "buy_to_open" => Ok(Self::BuyToOpen),
            "buy_to_close" => Ok(Self::BuyToClose),
            "sell_to_open" => Ok(Self::SellToOpen),
            "sell_to_close" => Ok(Self::SellToClose),
            _ => Err(InvalidOrderIntent::unknown("side", s)),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
