//! Observability module for logging and metrics.
//!
//! Structured logs go through `tracing`; counters and latency histograms are
//! exported to Prometheus when enabled in configuration.

mod logging;
mod metrics;

pub use self::logging::init_tracing;
pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_audit_failure, record_broker_request,
    record_order_built,
};
