//! Audit Sinks
//!
//! Implementations of `AuditSinkPort`.

mod in_memory;
mod tracing_sink;

pub use in_memory::InMemoryAuditSink;
pub use tracing_sink::TracingAuditSink;
