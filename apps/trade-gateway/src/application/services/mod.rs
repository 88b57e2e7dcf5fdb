//! Application Services
//!
//! Stateless services shared by the use cases.

mod audit_recorder;
mod order_builder;

pub use audit_recorder::AuditRecorder;
pub use order_builder::OrderBuilder;
