//! Broker Adapters
//!
//! Implementations of `BrokerPort`.

pub mod tradier;

pub use tradier::{TradierConfig, TradierRouter};
