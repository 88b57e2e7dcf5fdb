//! Trade Gateway Binary
//!
//! Loads configuration, wires the gateway and checks connectivity to the
//! trade account.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin trade-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `TRADE_GATEWAY_CONFIG`: config file path (default: config.yaml)
//! - `TRADIER_LIVE_API_KEY`, `TRADIER_SANDBOX_API_KEY`, `TRADIER_SANDBOX_ACCOUNT_ID`:
//!   credentials interpolated by config.yaml
//! - `RUST_LOG`: Log filter (overrides `observability.log_level`)

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use trade_gateway::config::{load_config, validate_startup};
use trade_gateway::observability::{MetricsConfig, init_metrics, init_tracing};
use trade_gateway::{
    AuditDirection, AuditEvent, AuditKind, Container, Correlation, TracingAuditSink,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    let config_path = std::env::var("TRADE_GATEWAY_CONFIG").ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.observability.log_level);
    tracing::info!("Starting trade gateway");

    if config.observability.metrics_enabled {
        let metrics_config = MetricsConfig::from_addr(&config.observability.metrics_addr)?;
        init_metrics(&metrics_config).context("failed to start metrics exporter")?;
    }

    let startup = validate_startup(&config);
    for warning in &startup.warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        data_base_url = %config.brokers.data.base_url,
        trade_base_url = %config.brokers.trade.base_url,
        timeout_secs = config.brokers.timeout_secs,
        require_confirm_market_only = config.policy.require_confirm_market_only,
        limit_slippage_bps = %config.policy.limit_slippage_bps,
        extended_hours_enabled = config.policy.extended_hours_enabled,
        "Configuration loaded"
    );

    let container = Container::from_config(&config, Arc::new(TracingAuditSink))
        .context("failed to create broker router")?;

    let audit = container.audit();
    audit
        .record(&AuditEvent::new(
            AuditKind::System,
            AuditDirection::Out,
            audit.actor(),
            json!("Gateway started"),
        ))
        .await;

    match container
        .positions_use_case()
        .execute(Correlation::default())
        .await
    {
        Ok(_) => tracing::info!("Trade account reachable"),
        Err(e) => tracing::warn!(error = %e, "Trade account check failed"),
    }

    tracing::info!("Trade gateway ready");
    Ok(())
}
