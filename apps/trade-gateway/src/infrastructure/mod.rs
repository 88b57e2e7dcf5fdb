//! Infrastructure Layer
//!
//! Adapters implementing the application ports:
//!
//! - `broker`: Tradier request router (reqwest)
//! - `audit`: in-memory and log-backed audit sinks
//! - `config`: dependency injection container

pub mod audit;
pub mod broker;
pub mod config;

pub use audit::{InMemoryAuditSink, TracingAuditSink};
pub use broker::{TradierConfig, TradierRouter};
pub use config::Container;
