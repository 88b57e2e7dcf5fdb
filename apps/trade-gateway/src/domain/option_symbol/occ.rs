//! OCC option symbol codec.
//!
//! Canonical form: `{ROOT}{YY}{MM}{DD}{C|P}{STRIKE}` where the strike is
//! expressed in thousandths of a unit and zero-padded to 8 digits.
//!
//! - `AMD` expiring 2025-08-22, call, strike 185.00 → `AMD250822C00185000`

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places carried by the strike field.
const STRIKE_SCALE: u32 = 3;

/// Thousandths per unit of strike.
const STRIKE_MULTIPLIER: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Largest strike that fits the 8-digit field, in thousandths.
const MAX_STRIKE_THOUSANDTHS: u32 = 99_999_999;

/// Length of the `YYMMDD` + type + strike suffix.
const SUFFIX_LEN: usize = 15;

/// Characters scanned by [`infer_underlying`] before giving up on a digit.
const INFER_SCAN_LIMIT: usize = 21;

/// Characters returned by [`infer_underlying`] when no digit is found.
const INFER_FALLBACK_LEN: usize = 4;

/// Errors from building or parsing OCC symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccSymbolError {
    /// Underlying is empty or not ASCII alphanumeric.
    #[error("underlying must be non-empty ASCII alphanumeric, got {0:?}")]
    InvalidUnderlying(String),

    /// Expiry year cannot be represented by a two-digit year.
    #[error("expiry year {0} is outside the OCC range 2000-2099")]
    ExpiryOutOfRange(i32),

    /// Expiry string is not a calendar date.
    #[error("invalid expiry date: {0:?}")]
    InvalidExpiry(String),

    /// Strike is negative.
    #[error("strike must be non-negative, got {0}")]
    NegativeStrike(Decimal),

    /// Strike does not fit the 8-digit field.
    #[error("strike {0} exceeds the 8-digit OCC strike field")]
    StrikeTooLarge(Decimal),

    /// Option type string is neither call nor put.
    #[error("unknown option type: {0:?}")]
    UnknownOptionType(String),

    /// Symbol does not follow the OCC layout.
    #[error("malformed OCC symbol: {0:?}")]
    Malformed(String),
}

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionType {
    /// Single-letter code used in the OCC symbol.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Parse the single-letter OCC code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'C' => Some(Self::Call),
            'P' => Some(Self::Put),
            _ => None,
        }
    }
}

impl FromStr for OptionType {
    type Err = OccSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            _ => Err(OccSymbolError::UnknownOptionType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// A standardized option contract identifier.
///
/// The strike is stored in thousandths, so any strike with finer precision is
/// rounded (half-to-even) when the symbol is built. Two symbols compare equal
/// when their canonical strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccSymbol {
    underlying: String,
    expiry: NaiveDate,
    option_type: OptionType,
    strike_thousandths: u32,
}

impl OccSymbol {
    /// Build a symbol from contract terms.
    ///
    /// The underlying is uppercased. Strikes finer than a thousandth are
    /// rounded to the nearest thousandth; this is the only lossy step.
    pub fn new(
        underlying: &str,
        expiry: NaiveDate,
        option_type: OptionType,
        strike: Decimal,
    ) -> Result<Self, OccSymbolError> {
        let underlying = underlying.trim().to_ascii_uppercase();
        if underlying.is_empty() || !underlying.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(OccSymbolError::InvalidUnderlying(underlying));
        }

        let year = expiry.year();
        if !(2000..=2099).contains(&year) {
            return Err(OccSymbolError::ExpiryOutOfRange(year));
        }

        if strike.is_sign_negative() && !strike.is_zero() {
            return Err(OccSymbolError::NegativeStrike(strike));
        }

        let rounded = strike.round_dp_with_strategy(STRIKE_SCALE, RoundingStrategy::MidpointNearestEven);
        let strike_thousandths = (rounded * STRIKE_MULTIPLIER)
            .to_u32()
            .filter(|t| *t <= MAX_STRIKE_THOUSANDTHS)
            .ok_or(OccSymbolError::StrikeTooLarge(strike))?;

        Ok(Self {
            underlying,
            expiry,
            option_type,
            strike_thousandths,
        })
    }

    /// Underlying ticker (uppercase).
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Expiration date.
    #[must_use]
    pub const fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Call or put.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    #[must_use]
    pub fn strike(&self) -> Decimal {
        Decimal::new(i64::from(self.strike_thousandths), STRIKE_SCALE)
    }

    /// Canonical OCC string.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{:02}{:02}{:02}{}{:08}",
            self.underlying,
            self.expiry.year() % 100,
            self.expiry.month(),
            self.expiry.day(),
            self.option_type.code(),
            self.strike_thousandths
        )
    }
}

impl fmt::Display for OccSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for OccSymbol {
    type Err = OccSymbolError;

    /// Parse a canonical OCC string. Interior padding spaces
    /// (`"AAPL  240119C00185000"`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        if !normalized.is_ascii() || normalized.len() <= SUFFIX_LEN {
            return Err(OccSymbolError::Malformed(s.to_string()));
        }

        let (root, suffix) = normalized.split_at(normalized.len() - SUFFIX_LEN);
        let date = &suffix[..6];
        let strike = &suffix[7..];
        let malformed = || OccSymbolError::Malformed(s.to_string());

        if !date.bytes().all(|b| b.is_ascii_digit()) || !strike.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let option_type = suffix
            .chars()
            .nth(6)
            .and_then(OptionType::from_code)
            .ok_or_else(malformed)?;

        let yy: i32 = date[0..2].parse().map_err(|_| malformed())?;
        let mm: u32 = date[2..4].parse().map_err(|_| malformed())?;
        let dd: u32 = date[4..6].parse().map_err(|_| malformed())?;
        let expiry = NaiveDate::from_ymd_opt(2000 + yy, mm, dd)
            .ok_or_else(|| OccSymbolError::InvalidExpiry(date.to_string()))?;

        let thousandths: i64 = strike.parse().map_err(|_| malformed())?;

        Self::new(root, expiry, option_type, Decimal::new(thousandths, STRIKE_SCALE))
    }
}

/// Encode contract terms straight to the canonical OCC string.
pub fn encode(
    underlying: &str,
    expiry: NaiveDate,
    option_type: OptionType,
    strike: Decimal,
) -> Result<String, OccSymbolError> {
    OccSymbol::new(underlying, expiry, option_type, strike).map(|s| s.encode())
}

/// Best-effort underlying extraction from an OCC-like string.
///
/// This is a heuristic. It returns the uppercased prefix before the first
/// ASCII digit (the expiry starts with digits). When no digit appears in the
/// first [`INFER_SCAN_LIMIT`] characters it returns the first four characters
/// uppercased. A symbol that starts with a digit yields an empty string.
/// Only use it when no explicit underlying is known.
#[must_use]
pub fn infer_underlying(occ: &str) -> String {
    let trimmed = occ.trim();
    let take = trimmed
        .chars()
        .take(INFER_SCAN_LIMIT)
        .position(|c| c.is_ascii_digit())
        .unwrap_or(INFER_FALLBACK_LEN);

    trimmed.chars().take(take).collect::<String>().to_uppercase()
}
