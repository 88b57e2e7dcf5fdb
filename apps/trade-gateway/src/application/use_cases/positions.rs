//! Positions Use Case

use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{BrokerPort, BrokerProfile, BrokerRequest, endpoints};
use crate::domain::audit::Correlation;
use crate::error::GatewayError;

/// Use case for reading open positions on the trade account.
pub struct PositionsUseCase<B>
where
    B: BrokerPort,
{
    broker: Arc<B>,
}

impl<B> PositionsUseCase<B>
where
    B: BrokerPort,
{
    /// Create a new `PositionsUseCase`.
    pub const fn new(broker: Arc<B>) -> Self {
        Self { broker }
    }

    /// Open positions as returned by the broker.
    pub async fn execute(&self, correlation: Correlation) -> Result<Value, GatewayError> {
        let request = BrokerRequest::get(BrokerProfile::Trade, endpoints::POSITIONS)
            .with_correlation(correlation);
        Ok(self.broker.send(request).await?)
    }
}
