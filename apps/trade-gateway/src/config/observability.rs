//! Observability configuration.

use serde::{Deserialize, Serialize};

/// Logging and metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default log directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Start the Prometheus exporter.
    #[serde(default, deserialize_with = "super::policy::deserialize_flag")]
    pub metrics_enabled: bool,
    /// Prometheus listener address.
    #[serde(default = "default_metrics_addr")]
    pub metrics_addr: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_enabled: false,
            metrics_addr: default_metrics_addr(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9090".to_string()
}
