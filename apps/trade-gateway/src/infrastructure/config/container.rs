//! Dependency Injection Container
//!
//! Wires the broker, the audit recorder and the order builder from a loaded
//! configuration, and hands out use cases.

use std::sync::Arc;

use crate::application::ports::{AuditSinkPort, BrokerPort, BrokerRequestError};
use crate::application::services::{AuditRecorder, OrderBuilder};
use crate::application::use_cases::{MarketDataUseCase, PlaceOrderUseCase, PositionsUseCase};
use crate::config::Config;
use crate::infrastructure::broker::{TradierConfig, TradierRouter};

/// Dependency injection container.
pub struct Container<B>
where
    B: BrokerPort + 'static,
{
    broker: Arc<B>,
    audit: Arc<AuditRecorder>,
    builder: Arc<OrderBuilder>,
}

impl Container<TradierRouter> {
    /// Wire the Tradier router and services from configuration.
    pub fn from_config(
        config: &Config,
        sink: Arc<dyn AuditSinkPort>,
    ) -> Result<Self, BrokerRequestError> {
        let audit = Arc::new(AuditRecorder::new(sink, config.audit.clone()));
        let router = TradierRouter::new(TradierConfig::from(&config.brokers), Arc::clone(&audit))?;
        let builder = Arc::new(OrderBuilder::new(config.policy.clone(), Arc::clone(&audit)));
        Ok(Self::new(Arc::new(router), audit, builder))
    }
}

impl<B> Container<B>
where
    B: BrokerPort + 'static,
{
    /// Create a container from already-built parts.
    pub const fn new(broker: Arc<B>, audit: Arc<AuditRecorder>, builder: Arc<OrderBuilder>) -> Self {
        Self {
            broker,
            audit,
            builder,
        }
    }

    /// Get the broker port.
    pub fn broker(&self) -> Arc<B> {
        Arc::clone(&self.broker)
    }

    /// Get the audit recorder.
    pub fn audit(&self) -> Arc<AuditRecorder> {
        Arc::clone(&self.audit)
    }

    /// Get the order builder.
    pub fn order_builder(&self) -> Arc<OrderBuilder> {
        Arc::clone(&self.builder)
    }

    /// Create the place order use case.
    pub fn place_order_use_case(&self) -> PlaceOrderUseCase<B> {
        PlaceOrderUseCase::new(self.broker(), self.order_builder(), self.audit())
    }

    /// Create the market data use case.
    pub fn market_data_use_case(&self) -> MarketDataUseCase<B> {
        MarketDataUseCase::new(self.broker())
    }

    /// Create the positions use case.
    pub fn positions_use_case(&self) -> PositionsUseCase<B> {
        PositionsUseCase::new(self.broker())
    }
}
