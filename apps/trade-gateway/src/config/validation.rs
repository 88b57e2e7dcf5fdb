//! Startup validation.
//!
//! Missing credentials are not a load error: the router fails fast on first
//! use of the affected profile. Startup only reports them so the operator
//! sees the problem before the first request.

use super::Config;

/// Result of startup validation.
#[derive(Debug, Default)]
pub struct StartupValidation {
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

impl StartupValidation {
    /// Whether startup found nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Inspect a loaded configuration for credentials that will fail at first use.
#[must_use]
pub fn validate_startup(config: &Config) -> StartupValidation {
    let mut warnings = Vec::new();
    let brokers = &config.brokers;

    if brokers.data.token.is_empty() {
        warnings.push("brokers.data.token is not set; market data requests will fail".to_string());
    }
    if brokers.trade.token.is_empty() {
        warnings.push("brokers.trade.token is not set; trade requests will fail".to_string());
    }
    if brokers.trade.account_id.is_empty() {
        warnings.push(
            "brokers.trade.account_id is not set; order and position requests will fail"
                .to_string(),
        );
    }
    if brokers.data.base_url == brokers.trade.base_url {
        warnings.push(
            "data and trade profiles share a base URL; market data and execution are not split"
                .to_string(),
        );
    }

    StartupValidation { warnings }
}
