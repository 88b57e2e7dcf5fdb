//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Directive applied when `RUST_LOG` does not set one for this crate.
const CRATE_TARGET: &str = "trade_gateway";

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `default_level`.
/// Safe to call more than once: later calls are ignored.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn default_directives(level: &str) -> String {
    let level = if level.trim().is_empty() { "info" } else { level.trim() };
    format!("warn,{CRATE_TARGET}={level},audit={level}")
}
