//! Audit records.
//!
//! The gateway only produces rows; storing them is the sink's job.

mod event;

pub use event::{
    AuditDirection, AuditEvent, AuditKind, Correlation, EVENT_COLUMNS, TRADE_COLUMNS, TradeRecord,
};
