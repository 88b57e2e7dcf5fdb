//! Audit Recorder Service
//!
//! Writes event and trade rows to the audit sink. Appends are best-effort:
//! a failed append is logged and counted, never returned to the caller.

use std::sync::Arc;

use crate::application::ports::AuditSinkPort;
use crate::config::AuditConfig;
use crate::domain::audit::{AuditEvent, TradeRecord};
use crate::observability::record_audit_failure;

/// Service that appends audit rows to the configured tabs.
pub struct AuditRecorder {
    sink: Arc<dyn AuditSinkPort>,
    config: AuditConfig,
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuditRecorder {
    /// Create a recorder over `sink`.
    pub fn new(sink: Arc<dyn AuditSinkPort>, config: AuditConfig) -> Self {
        Self { sink, config }
    }

    /// Actor recorded on events the gateway originates.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.config.actor
    }

    /// Actor recorded on broker responses.
    #[must_use]
    pub fn broker_actor(&self) -> &str {
        &self.config.broker_actor
    }

    /// Append an event row. Returns whether the sink accepted it.
    pub async fn record(&self, event: &AuditEvent) -> bool {
        self.append(&self.config.events_tab, event.to_row()).await
    }

    /// Append a trade row. Returns whether the sink accepted it.
    pub async fn record_trade(&self, record: &TradeRecord) -> bool {
        self.append(&self.config.trades_tab, record.to_row()).await
    }

    async fn append(&self, tab: &str, row: Vec<String>) -> bool {
        match self.sink.append(tab, row).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(tab, error = %e, "Audit append failed, continuing");
                record_audit_failure(tab);
                false
            }
        }
    }
}
