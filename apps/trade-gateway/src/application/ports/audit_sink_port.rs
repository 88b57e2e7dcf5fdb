//! Audit Sink Port (Driven Port)
//!
//! Append-only tabular log. Rows are string columns appended to a named tab.

use async_trait::async_trait;

/// Audit sink error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditSinkError {
    /// Backing store not reachable.
    #[error("Audit sink unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Append was attempted and failed.
    #[error("Failed to append to tab '{tab}': {message}")]
    AppendFailed {
        /// Target tab.
        tab: String,
        /// Error details.
        message: String,
    },
}

/// Port for appending audit rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditSinkPort: Send + Sync {
    /// Append one row of column values to `tab`.
    async fn append(&self, tab: &str, values: Vec<String>) -> Result<(), AuditSinkError>;
}

/// Sink that discards every row.
#[derive(Debug, Clone, Default)]
pub struct NoOpAuditSink;

#[async_trait]
impl AuditSinkPort for NoOpAuditSink {
    async fn append(&self, _tab: &str, _values: Vec<String>) -> Result<(), AuditSinkError> {
        Ok(())
    }
}
