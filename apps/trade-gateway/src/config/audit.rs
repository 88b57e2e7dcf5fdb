//! Audit log naming.

use serde::{Deserialize, Serialize};

/// Tab and actor names used when writing audit rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Tab receiving event rows.
    #[serde(default = "default_events_tab")]
    pub events_tab: String,
    /// Tab receiving trade rows.
    #[serde(default = "default_trades_tab")]
    pub trades_tab: String,
    /// Actor recorded on outbound events.
    #[serde(default = "default_actor")]
    pub actor: String,
    /// Actor recorded on broker responses.
    #[serde(default = "default_broker_actor")]
    pub broker_actor: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            events_tab: default_events_tab(),
            trades_tab: default_trades_tab(),
            actor: default_actor(),
            broker_actor: default_broker_actor(),
        }
    }
}

fn default_events_tab() -> String {
    "Events".to_string()
}

fn default_trades_tab() -> String {
    "Trades".to_string()
}

fn default_actor() -> String {
    "bot".to_string()
}

fn default_broker_actor() -> String {
    "tradier".to_string()
}
