//! Audit sink that writes rows to the log.

use async_trait::async_trait;

use crate::application::ports::{AuditSinkError, AuditSinkPort};

/// Emits each row as a structured record on the `audit` log target.
///
/// Used when no external store is configured; rows can be shipped from the
/// log stream.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSinkPort for TracingAuditSink {
    async fn append(&self, tab: &str, values: Vec<String>) -> Result<(), AuditSinkError> {
        let row = serde_json::to_string(&values).map_err(|e| AuditSinkError::AppendFailed {
            tab: tab.to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(target: "audit", tab, row = %row, "audit row");
        Ok(())
    }
}
