//! In-memory audit sink for testing and inspection.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{AuditSinkError, AuditSinkPort};

/// In-memory implementation of `AuditSinkPort`.
///
/// Rows are kept in append order per sink. Availability can be toggled to
/// simulate an outage.
#[derive(Debug)]
pub struct InMemoryAuditSink {
    rows: RwLock<Vec<(String, Vec<String>)>>,
    available: AtomicBool,
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuditSink {
    /// Create a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Rows appended to `tab`, oldest first.
    #[must_use]
    pub fn rows(&self, tab: &str) -> Vec<Vec<String>> {
        self.rows
            .read()
            .iter()
            .filter(|(t, _)| t == tab)
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Total number of rows across tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check if nothing was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Drop all rows.
    pub fn clear(&self) {
        self.rows.write().clear();
    }

    /// Simulate the backing store going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditSinkPort for InMemoryAuditSink {
    async fn append(&self, tab: &str, values: Vec<String>) -> Result<(), AuditSinkError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(AuditSinkError::Unavailable {
                message: "in-memory sink disabled".to_string(),
            });
        }
        self.rows.write().push((tab.to_string(), values));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn rows_are_grouped_by_tab() {
        let sink = InMemoryAuditSink::new();
        sink.append("Events", vec!["a".into()]).await.unwrap();
        sink.append("Trades", vec!["b".into()]).await.unwrap();
        sink.append("Events", vec!["c".into()]).await.unwrap();

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.rows("Events"), vec![vec!["a"], vec!["c"]]);
        assert_eq!(sink.rows("Trades"), vec![vec!["b"]]);
        assert!(sink.rows("Other").is_empty());
    }

    #[tokio::test]
    async fn unavailable_sink_rejects_appends() {
        let sink = InMemoryAuditSink::new();
        sink.set_available(false);
        let err = sink.append("Events", vec![]).await.unwrap_err();
        assert!(matches!(err, AuditSinkError::Unavailable { .. }));
        assert!(sink.is_empty());

        sink.set_available(true);
        assert!(sink.append("Events", vec![]).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let sink = Arc::clone(&sink);
                tokio::spawn(async move { sink.append("Events", vec![i.to_string()]).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(sink.rows("Events").len(), 16);

        sink.clear();
        assert!(sink.is_empty());
    }
}
