//! Tradier Broker Adapter
//!
//! Implementation of `BrokerPort` for the Tradier REST API with:
//! - Separate market data and trade execution profiles
//! - Bearer authentication and account path interpolation
//! - Audit events around every exchange

mod adapter;
mod config;
mod http_client;

pub use adapter::TradierRouter;
pub use config::{ACCOUNT_PLACEHOLDER, TradierConfig, TradierProfileConfig};
