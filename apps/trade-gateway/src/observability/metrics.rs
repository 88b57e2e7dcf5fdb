//! Prometheus metrics for the trade gateway.
//!
//! # Example
//!
//! ```ignore
//! use trade_gateway::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_broker_request("DATA", "GET", "ok", 0.120);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for broker latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // 10ms to 20s, the default request timeout
            latency_buckets: vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0],
        }
    }
}

impl MetricsConfig {
    /// Parse a listen address such as `0.0.0.0:9090`.
    pub fn from_addr(addr: &str) -> Result<Self, MetricsError> {
        let listen_addr = addr
            .parse()
            .map_err(|e| MetricsError::Configuration(format!("invalid address {addr:?}: {e}")))?;
        Ok(Self {
            listen_addr,
            ..Default::default()
        })
    }
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Initialize the Prometheus exporter, serving `/metrics` on `listen_addr`.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %config.listen_addr, "Prometheus metrics exporter started");
    Ok(())
}

/// Record one broker exchange.
///
/// * `profile` - `DATA` or `TRADE`
/// * `method` - HTTP method
/// * `outcome` - `ok`, `status`, `transport`, `decode`
/// * `latency_seconds` - time from send to decoded body
pub fn record_broker_request(profile: &str, method: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "broker_requests_total",
        "profile" => profile.to_string(),
        "method" => method.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "broker_request_duration_seconds",
        "profile" => profile.to_string(),
        "method" => method.to_string()
    )
    .record(latency_seconds);
}

/// Record an audit row the sink rejected.
pub fn record_audit_failure(tab: &str) {
    counter!("audit_append_failures_total", "tab" => tab.to_string()).increment(1);
}

/// Record a payload produced by the order builder.
pub fn record_order_built(asset_class: &str, order_type: &str, confirm_required: bool) {
    counter!(
        "orders_built_total",
        "class" => asset_class.to_string(),
        "type" => order_type.to_string(),
        "confirm_required" => confirm_required.to_string()
    )
    .increment(1);
}
