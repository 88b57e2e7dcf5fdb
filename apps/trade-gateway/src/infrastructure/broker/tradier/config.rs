//! Tradier adapter configuration.

use std::fmt;
use std::time::Duration;

use crate::application::ports::{BrokerProfile, BrokerRequestError};
use crate::config::{BrokerProfileConfig, BrokersConfig};

/// Placeholder replaced by the profile's account id.
pub const ACCOUNT_PLACEHOLDER: &str = "{account}";

/// One endpoint profile: base URL, bearer token, optional account scope.
#[derive(Clone)]
pub struct TradierProfileConfig {
    profile: BrokerProfile,
    base_url: String,
    token: String,
    account_id: String,
}

impl fmt::Debug for TradierProfileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradierProfileConfig")
            .field("profile", &self.profile)
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl TradierProfileConfig {
    /// Create a profile.
    #[must_use]
    pub fn new(profile: BrokerProfile, base_url: &str, token: &str, account_id: &str) -> Self {
        Self {
            profile,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            account_id: account_id.trim().to_string(),
        }
    }

    fn from_config(profile: BrokerProfile, config: &BrokerProfileConfig) -> Self {
        Self::new(profile, &config.base_url, &config.token, &config.account_id)
    }

    /// Which profile this is.
    #[must_use]
    pub const fn profile(&self) -> BrokerProfile {
        self.profile
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token, or an error when none is configured.
    pub fn token(&self) -> Result<&str, BrokerRequestError> {
        if self.token.is_empty() {
            return Err(self.missing("token"));
        }
        Ok(&self.token)
    }

    /// Endpoint path with the account placeholder filled in and a leading `/`.
    pub fn resolve_path(&self, endpoint: &str) -> Result<String, BrokerRequestError> {
        let path = if endpoint.contains(ACCOUNT_PLACEHOLDER) {
            if self.account_id.is_empty() {
                return Err(self.missing("account_id"));
            }
            endpoint.replace(ACCOUNT_PLACEHOLDER, &self.account_id)
        } else {
            endpoint.to_string()
        };

        if path.starts_with('/') {
            Ok(path)
        } else {
            Ok(format!("/{path}"))
        }
    }

    /// Absolute URL for a resolved path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    const fn missing(&self, field: &'static str) -> BrokerRequestError {
        BrokerRequestError::MissingCredentials {
            profile: self.profile,
            field,
        }
    }
}

/// Configuration for the Tradier router.
#[derive(Debug, Clone)]
pub struct TradierConfig {
    /// Market data profile.
    pub data: TradierProfileConfig,
    /// Trade execution profile.
    pub trade: TradierProfileConfig,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl TradierConfig {
    /// Profile settings for `profile`.
    #[must_use]
    pub const fn profile(&self, profile: BrokerProfile) -> &TradierProfileConfig {
        match profile {
            BrokerProfile::Data => &self.data,
            BrokerProfile::Trade => &self.trade,
        }
    }
}

impl From<&BrokersConfig> for TradierConfig {
    fn from(config: &BrokersConfig) -> Self {
        Self {
            data: TradierProfileConfig::from_config(BrokerProfile::Data, &config.data),
            trade: TradierProfileConfig::from_config(BrokerProfile::Trade, &config.trade),
            timeout: config.timeout(),
        }
    }
}
