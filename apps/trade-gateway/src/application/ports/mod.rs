//! Application Ports (Driven)
//!
//! Interfaces the application uses to reach the broker and the audit log.

mod audit_sink_port;
mod broker_port;

#[cfg(test)]
pub use audit_sink_port::MockAuditSinkPort;
pub use audit_sink_port::{AuditSinkError, AuditSinkPort, NoOpAuditSink};
#[cfg(test)]
pub use broker_port::MockBrokerPort;
pub use broker_port::{
    BrokerPort, BrokerProfile, BrokerRequest, BrokerRequestError, HttpMethod, endpoints,
};
