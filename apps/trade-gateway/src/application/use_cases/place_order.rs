//! Place Order Use Case
//!
//! Build a payload from an intent, post it to the trade account and record
//! the submission in the trade log.

use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{BrokerPort, BrokerProfile, BrokerRequest, endpoints};
use crate::application::services::{AuditRecorder, OrderBuilder};
use crate::domain::audit::TradeRecord;
use crate::domain::order::{BrokerOrderPayload, OrderIntent};
use crate::error::GatewayError;

/// Result of a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    /// Payload that was posted.
    pub payload: BrokerOrderPayload,
    /// Whether the policy asked for human confirmation.
    pub confirmation_required: bool,
    /// Broker response, unmodified.
    pub response: Value,
}

/// Use case for placing equity and option orders.
pub struct PlaceOrderUseCase<B>
where
    B: BrokerPort,
{
    broker: Arc<B>,
    builder: Arc<OrderBuilder>,
    audit: Arc<AuditRecorder>,
}

impl<B> PlaceOrderUseCase<B>
where
    B: BrokerPort,
{
    /// Create a new `PlaceOrderUseCase`.
    pub const fn new(broker: Arc<B>, builder: Arc<OrderBuilder>, audit: Arc<AuditRecorder>) -> Self {
        Self {
            broker,
            builder,
            audit,
        }
    }

    /// Build and submit `intent`.
    ///
    /// An invalid intent fails before any request is made. A broker failure
    /// leaves no trade row.
    pub async fn execute(&self, intent: OrderIntent) -> Result<OrderSubmission, GatewayError> {
        // 1. Build (validation, policy, slippage)
        let payload = self.builder.build(&intent).await?;
        let confirmation_required = self.builder.confirmation_required(&intent);

        // 2. Submit
        let request = BrokerRequest::post(BrokerProfile::Trade, endpoints::ORDERS)
            .with_form(payload.to_form_fields())
            .with_correlation(intent.correlation.clone());
        let response = self.broker.send(request).await?;

        tracing::info!(
            symbol = payload.traded_symbol(),
            side = %payload.side(),
            quantity = payload.quantity(),
            order_type = %payload.order_type(),
            "Order submitted"
        );

        // 3. Trade log
        let record = TradeRecord::new(
            payload.side().as_str(),
            payload.traded_symbol(),
            payload.quantity(),
            response.clone(),
        );
        self.audit.record_trade(&record).await;

        Ok(OrderSubmission {
            payload,
            confirmation_required,
            response,
        })
    }
}
