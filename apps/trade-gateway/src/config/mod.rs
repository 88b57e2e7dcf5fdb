//! Configuration module for the trade gateway.
//!
//! Configuration is read once at startup, validated, and then passed by
//! reference into the router and the order builder. Nothing in the core
//! reads the environment directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_gateway::config::load_config;
//!
//! let config = load_config(Some("config.yaml"))?;
//! println!("trade endpoint: {}", config.brokers.trade.base_url);
//! ```

mod audit;
mod brokers;
mod observability;
mod policy;
mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use audit::AuditConfig;
pub use brokers::{BrokerProfileConfig, BrokersConfig};
pub use observability::ObservabilityConfig;
pub use policy::PolicyConfig;
pub use validation::{StartupValidation, validate_startup};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Broker endpoint profiles.
    #[serde(default)]
    pub brokers: BrokersConfig,
    /// Confirmation, slippage and session policy.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Audit tab and actor names.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Logging and metrics.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let mut config: Config = serde_yaml_bw::from_str(&interpolated)?;
    config.brokers.normalize();
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.brokers.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "brokers.timeout_secs must be positive".to_string(),
        ));
    }

    for (name, profile) in [
        ("brokers.data", &config.brokers.data),
        ("brokers.trade", &config.brokers.trade),
    ] {
        let url = profile.base_url.as_str();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::ValidationError(format!(
                "{name}.base_url must be an http(s) URL, got {url:?}"
            )));
        }
    }

    let bps = config.policy.limit_slippage_bps;
    if bps <= policy::MIN_SLIPPAGE_BPS || bps > policy::MAX_SLIPPAGE_BPS {
        return Err(ConfigError::ValidationError(format!(
            "policy.limit_slippage_bps must be greater than {} and at most {}, got {bps}",
            policy::MIN_SLIPPAGE_BPS,
            policy::MAX_SLIPPAGE_BPS
        )));
    }

    if config.audit.events_tab.trim().is_empty() || config.audit.trades_tab.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "audit tab names must not be empty".to_string(),
        ));
    }

    Ok(())
}
