//! Execution policy toggles.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Slippage at or below this would drive a limit price to zero or below.
pub(super) const MIN_SLIPPAGE_BPS: Decimal = Decimal::from_parts(10000, 0, 0, true, 0);

/// Largest accepted slippage: doubling a limit price.
pub(super) const MAX_SLIPPAGE_BPS: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Confirmation, slippage and session policy applied by the order builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Strict mode: only immediate market orders need confirmation.
    /// When off, every order needs confirmation.
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub require_confirm_market_only: bool,
    /// Basis points added to limit prices of `limit` / `stop_limit` orders.
    #[serde(default)]
    pub limit_slippage_bps: Decimal,
    /// Force every order into the extended session.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub extended_hours_enabled: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            require_confirm_market_only: true,
            limit_slippage_bps: Decimal::ZERO,
            extended_hours_enabled: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Accept YAML booleans as well as the usual truthy strings
/// (`1`, `true`, `t`, `yes`, `y`, `on`). Anything else is false.
pub(super) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i == 1,
        Flag::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "t" | "yes" | "y" | "on"
        ),
    })
}
