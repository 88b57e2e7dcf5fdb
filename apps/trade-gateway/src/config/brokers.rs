//! Broker endpoint profiles.
//!
//! Market data and trade execution are configured independently: each has
//! its own base URL and bearer token, and the trade profile carries the
//! account the order paths are scoped to.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokersConfig {
    /// Market data profile (read-only endpoints).
    #[serde(default = "BrokerProfileConfig::data_default")]
    pub data: BrokerProfileConfig,
    /// Trade execution profile.
    #[serde(default = "BrokerProfileConfig::trade_default")]
    pub trade: BrokerProfileConfig,
    /// Request timeout in seconds, shared by both profiles.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BrokersConfig {
    fn default() -> Self {
        Self {
            data: BrokerProfileConfig::data_default(),
            trade: BrokerProfileConfig::trade_default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BrokersConfig {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fill empty base URLs with the role defaults and trim trailing slashes
    /// and credential whitespace.
    pub(crate) fn normalize(&mut self) {
        self.data.normalize(DEFAULT_DATA_BASE_URL);
        self.trade.normalize(DEFAULT_TRADE_BASE_URL);
    }
}

/// One broker endpoint profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerProfileConfig {
    /// Base URL, e.g. `https://api.tradier.com/v1`.
    #[serde(default)]
    pub base_url: String,
    /// Bearer token.
    #[serde(default)]
    pub token: String,
    /// Account id interpolated into `/accounts/{account}/...` paths.
    #[serde(default)]
    pub account_id: String,
}

const DEFAULT_DATA_BASE_URL: &str = "https://api.tradier.com/v1";
const DEFAULT_TRADE_BASE_URL: &str = "https://sandbox.tradier.com/v1";

impl BrokerProfileConfig {
    fn data_default() -> Self {
        Self {
            base_url: DEFAULT_DATA_BASE_URL.to_string(),
            ..Self::default()
        }
    }

    fn trade_default() -> Self {
        Self {
            base_url: DEFAULT_TRADE_BASE_URL.to_string(),
            ..Self::default()
        }
    }

    fn normalize(&mut self, default_base_url: &str) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            default_base_url.to_string()
        } else {
            trimmed.to_string()
        };
        self.token = self.token.trim().to_string();
        self.account_id = self.account_id.trim().to_string();
    }
}

const fn default_timeout_secs() -> u64 {
    20
}
