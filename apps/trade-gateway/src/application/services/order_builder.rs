//! Order Builder Service
//!
//! Turns an [`OrderIntent`] into a [`BrokerOrderPayload`]. The steps run in a
//! fixed order: validate, resolve the contract, signal confirmation, apply
//! slippage, assemble. Nothing here touches the network.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::AuditRecorder;
use crate::config::PolicyConfig;
use crate::domain::audit::{AuditDirection, AuditEvent, AuditKind};
use crate::domain::option_symbol::{encode, infer_underlying};
use crate::domain::order::{
    AssetClass, BrokerOrderPayload, ContractRef, Instrument, InvalidOrderIntent, OrderIntent,
    Session,
};
use crate::domain::policy::{adjusts_limit_price, apply_slippage, requires_confirmation};
use crate::observability::record_order_built;

/// Builds broker payloads under the configured execution policy.
#[derive(Debug)]
pub struct OrderBuilder {
    policy: PolicyConfig,
    audit: Arc<AuditRecorder>,
}

impl OrderBuilder {
    /// Create a builder.
    pub const fn new(policy: PolicyConfig, audit: Arc<AuditRecorder>) -> Self {
        Self { policy, audit }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Whether `intent` needs human confirmation under the current policy.
    ///
    /// Advisory only: the builder records the requirement but never blocks.
    #[must_use]
    pub const fn confirmation_required(&self, intent: &OrderIntent) -> bool {
        requires_confirmation(
            intent.order_type,
            intent.is_conditional,
            self.policy.require_confirm_market_only,
        )
    }

    /// Build a payload for either asset class.
    pub async fn build(&self, intent: &OrderIntent) -> Result<BrokerOrderPayload, InvalidOrderIntent> {
        match intent.asset_class() {
            AssetClass::Equity => self.build_equity_order(intent).await,
            AssetClass::Option => self.build_option_order(intent).await,
        }
    }

    /// Build an equity payload.
    pub async fn build_equity_order(
        &self,
        intent: &OrderIntent,
    ) -> Result<BrokerOrderPayload, InvalidOrderIntent> {
        let Instrument::Equity { symbol } = &intent.instrument else {
            return Err(mismatch(AssetClass::Equity, intent));
        };
        intent.validate()?;

        let symbol = symbol.trim().to_ascii_uppercase();
        self.assemble(intent, AssetClass::Equity, symbol, None).await
    }

    /// Build an option payload.
    ///
    /// The underlying is the explicit one when given, otherwise inferred from
    /// the OCC symbol. Structured contract terms require an explicit
    /// underlying.
    pub async fn build_option_order(
        &self,
        intent: &OrderIntent,
    ) -> Result<BrokerOrderPayload, InvalidOrderIntent> {
        let Instrument::Option {
            underlying,
            contract,
        } = &intent.instrument
        else {
            return Err(mismatch(AssetClass::Option, intent));
        };
        intent.validate()?;

        let (underlying, occ) = resolve_contract(underlying.as_deref(), contract)?;
        self.assemble(intent, AssetClass::Option, underlying, Some(occ))
            .await
    }

    async fn assemble(
        &self,
        intent: &OrderIntent,
        class: AssetClass,
        symbol: String,
        option_symbol: Option<String>,
    ) -> Result<BrokerOrderPayload, InvalidOrderIntent> {
        let quantity = u64::try_from(intent.quantity)
            .map_err(|_| InvalidOrderIntent::NonPositiveQuantity(intent.quantity))?;

        let price = intent
            .limit_price
            .filter(|_| adjusts_limit_price(intent.order_type))
            .map(|limit| {
                apply_slippage(limit, self.policy.limit_slippage_bps).ok_or(
                    InvalidOrderIntent::PriceOutOfRange {
                        field: "limit price",
                        value: limit,
                    },
                )
            })
            .transpose()?;

        let confirm_required = self.confirmation_required(intent);
        if confirm_required {
            self.record_confirmation(intent, &symbol, option_symbol.as_deref())
                .await;
        }

        let stop = intent
            .stop_price
            .filter(|_| intent.order_type.requires_stop_price());

        let session = if self.policy.extended_hours_enabled {
            Session::Extended
        } else {
            intent.session
        };

        let payload = BrokerOrderPayload {
            class,
            symbol,
            option_symbol,
            side: intent.side,
            quantity,
            order_type: intent.order_type,
            duration: intent.duration,
            session,
            price,
            stop,
        };

        record_order_built(class.as_str(), intent.order_type.as_str(), confirm_required);
        tracing::debug!(
            class = %class,
            symbol = payload.traded_symbol(),
            side = %payload.side(),
            order_type = %payload.order_type(),
            session = %payload.session(),
            confirm_required,
            "Order payload built"
        );

        Ok(payload)
    }

    async fn record_confirmation(
        &self,
        intent: &OrderIntent,
        symbol: &str,
        option_symbol: Option<&str>,
    ) {
        let reason = if self.policy.require_confirm_market_only {
            "market order"
        } else {
            "all orders require confirmation"
        };

        let mut payload = Map::new();
        payload.insert("confirm_required".into(), Value::Bool(true));
        payload.insert("reason".into(), json!(reason));
        match option_symbol {
            Some(occ) => payload.insert("occ".into(), json!(occ)),
            None => payload.insert("symbol".into(), json!(symbol)),
        };

        let event = AuditEvent::new(
            AuditKind::Policy,
            AuditDirection::Out,
            self.audit.actor(),
            Value::Object(payload),
        )
        .with_correlation(intent.correlation.clone());

        tracing::info!(
            symbol = option_symbol.unwrap_or(symbol),
            order_type = %intent.order_type,
            reason,
            "Order requires confirmation"
        );
        self.audit.record(&event).await;
    }
}

/// Resolve `(underlying, occ)` for an option contract.
fn resolve_contract(
    underlying: Option<&str>,
    contract: &ContractRef,
) -> Result<(String, String), InvalidOrderIntent> {
    let explicit = underlying
        .map(|u| u.trim().to_ascii_uppercase())
        .filter(|u| !u.is_empty());

    match contract {
        ContractRef::Occ(occ) => {
            let occ = occ.trim().to_ascii_uppercase();
            let underlying = explicit.unwrap_or_else(|| infer_underlying(&occ));
            if underlying.is_empty() {
                return Err(InvalidOrderIntent::EmptySymbol);
            }
            Ok((underlying, occ))
        }
        ContractRef::Terms {
            expiry,
            option_type,
            strike,
        } => {
            let underlying = explicit.ok_or(InvalidOrderIntent::MissingUnderlying)?;
            let occ = encode(&underlying, *expiry, *option_type, *strike)?;
            Ok((underlying, occ))
        }
    }
}

const fn mismatch(expected: AssetClass, intent: &OrderIntent) -> InvalidOrderIntent {
    InvalidOrderIntent::AssetClassMismatch {
        expected,
        actual: intent.asset_class(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::domain::audit::Correlation;
    use crate::domain::option_symbol::OptionType;
    use crate::domain::order::{OrderDuration, OrderSide, OrderType};
    use crate::infrastructure::audit::InMemoryAuditSink;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn builder_with(policy: PolicyConfig) -> (OrderBuilder, Arc<InMemoryAuditSink>) {
        let sink = Arc::new(InMemoryAuditSink::new());
        let recorder = AuditRecorder::new(sink.clone(), AuditConfig::default());
        (OrderBuilder::new(policy, Arc::new(recorder)), sink)
    }

    fn builder() -> (OrderBuilder, Arc<InMemoryAuditSink>) {
        builder_with(PolicyConfig::default())
    }

    fn amd_call() -> ContractRef {
        ContractRef::Terms {
            expiry: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            option_type: OptionType::Call,
            strike: dec!(185),
        }
    }

    #[tokio::test]
    async fn market_equity_order_emits_policy_event() {
        let (builder, sink) = builder();
        let intent = OrderIntent::equity("aapl", OrderSide::Buy, 10, OrderType::Market)
            .with_correlation(Correlation::new("chan", "user"));

        let payload = builder.build_equity_order(&intent).await.unwrap();

        assert_eq!(payload.symbol(), "AAPL");
        assert_eq!(payload.quantity(), 10);
        assert_eq!(payload.price(), None);
        assert_eq!(payload.session(), Session::Regular);

        let rows = sink.rows("Events");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], "policy");
        assert_eq!(rows[0][2], "out");
        assert_eq!(rows[0][4], "chan");
        let body: Value = serde_json::from_str(&rows[0][6]).unwrap();
        assert_eq!(body["confirm_required"], true);
        assert_eq!(body["reason"], "market order");
        assert_eq!(body["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn conditional_market_order_skips_policy_event() {
        let (builder, sink) = builder();
        let intent =
            OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Market).conditional(true);

        builder.build(&intent).await.unwrap();
        assert!(sink.rows("Events").is_empty());
    }

    #[tokio::test]
    async fn relaxed_mode_flags_every_order() {
        let (builder, sink) = builder_with(PolicyConfig {
            require_confirm_market_only: false,
            ..PolicyConfig::default()
        });
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit)
            .with_limit_price(dec!(190));

        assert!(builder.confirmation_required(&intent));
        builder.build(&intent).await.unwrap();
        assert_eq!(sink.rows("Events").len(), 1);
    }

    #[tokio::test]
    async fn zero_quantity_fails_before_any_event() {
        let (builder, sink) = builder();
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 0, OrderType::Market);

        let err = builder.build_equity_order(&intent).await.unwrap_err();
        assert_eq!(err, InvalidOrderIntent::NonPositiveQuantity(0));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn limit_without_price_fails() {
        let (builder, _) = builder();
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit);
        assert!(matches!(
            builder.build(&intent).await,
            Err(InvalidOrderIntent::MissingLimitPrice { .. })
        ));
    }

    #[tokio::test]
    async fn slippage_applies_to_limit_not_stop() {
        let (builder, _) = builder_with(PolicyConfig {
            limit_slippage_bps: dec!(50),
            ..PolicyConfig::default()
        });
        let intent = OrderIntent::equity("AAPL", OrderSide::Sell, 5, OrderType::StopLimit)
            .with_limit_price(dec!(100.00))
            .with_stop_price(dec!(99.00));

        let payload = builder.build(&intent).await.unwrap();
        assert_eq!(payload.price(), Some(dec!(100.50)));
        assert_eq!(payload.stop(), Some(dec!(99.00)));
    }

    #[tokio::test]
    async fn prices_not_used_by_type_are_dropped() {
        let (builder, _) = builder();
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Stop)
            .with_stop_price(dec!(101))
            .with_limit_price(dec!(102));

        let payload = builder.build(&intent).await.unwrap();
        assert_eq!(payload.price(), None);
        assert_eq!(payload.stop(), Some(dec!(101)));
    }

    #[tokio::test]
    async fn slippage_overflow_is_rejected_without_events() {
        let (builder, sink) = builder_with(PolicyConfig {
            limit_slippage_bps: dec!(50),
            require_confirm_market_only: false,
            ..PolicyConfig::default()
        });
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit)
            .with_limit_price(Decimal::MAX);

        let err = builder.build(&intent).await.unwrap_err();
        assert_eq!(
            err,
            InvalidOrderIntent::PriceOutOfRange {
                field: "limit price",
                value: Decimal::MAX,
            }
        );
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn extended_toggle_overrides_requested_session() {
        let (builder, _) = builder_with(PolicyConfig {
            extended_hours_enabled: true,
            ..PolicyConfig::default()
        });
        let equity = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit)
            .with_limit_price(dec!(1))
            .with_session(Session::Regular);
        let option = OrderIntent::option(
            ContractRef::Occ("AMD250822C00185000".into()),
            OrderSide::BuyToOpen,
            1,
            OrderType::Limit,
        )
        .with_limit_price(dec!(2));

        assert_eq!(builder.build(&equity).await.unwrap().session(), Session::Extended);
        assert_eq!(builder.build(&option).await.unwrap().session(), Session::Extended);
    }

    #[tokio::test]
    async fn requested_session_kept_when_toggle_off() {
        let (builder, _) = builder();
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit)
            .with_limit_price(dec!(1))
            .with_session(Session::Extended)
            .with_duration(OrderDuration::Pre);

        let payload = builder.build(&intent).await.unwrap();
        assert_eq!(payload.session(), Session::Extended);
        assert_eq!(payload.duration(), OrderDuration::Pre);
    }

    #[tokio::test]
    async fn option_from_terms_encodes_occ() {
        let (builder, sink) = builder();
        let intent = OrderIntent::option(amd_call(), OrderSide::BuyToOpen, 2, OrderType::Market)
            .with_underlying("amd");

        let payload = builder.build_option_order(&intent).await.unwrap();
        assert_eq!(payload.symbol(), "AMD");
        assert_eq!(payload.option_symbol(), Some("AMD250822C00185000"));
        assert_eq!(payload.traded_symbol(), "AMD250822C00185000");

        let rows = sink.rows("Events");
        let body: Value = serde_json::from_str(&rows[0][6]).unwrap();
        assert_eq!(body["occ"], "AMD250822C00185000");
    }

    #[tokio::test]
    async fn option_terms_without_underlying_fail() {
        let (builder, _) = builder();
        let intent = OrderIntent::option(amd_call(), OrderSide::BuyToOpen, 1, OrderType::Market);
        assert_eq!(
            builder.build(&intent).await,
            Err(InvalidOrderIntent::MissingUnderlying)
        );
    }

    #[tokio::test]
    async fn option_underlying_inferred_from_occ() {
        let (builder, _) = builder();
        let intent = OrderIntent::option(
            ContractRef::Occ(" spy250919p00550000 ".into()),
            OrderSide::SellToClose,
            1,
            OrderType::Market,
        );

        let payload = builder.build(&intent).await.unwrap();
        assert_eq!(payload.symbol(), "SPY");
        assert_eq!(payload.option_symbol(), Some("SPY250919P00550000"));
    }

    #[tokio::test]
    async fn explicit_underlying_wins_over_inference() {
        let (builder, _) = builder();
        let intent = OrderIntent::option(
            ContractRef::Occ("BRKB250919C00500000".into()),
            OrderSide::BuyToOpen,
            1,
            OrderType::Market,
        )
        .with_underlying("BRK.B");

        let payload = builder.build(&intent).await.unwrap();
        assert_eq!(payload.symbol(), "BRK.B");
    }

    #[tokio::test]
    async fn occ_with_leading_digit_has_no_underlying() {
        let (builder, _) = builder();
        let intent = OrderIntent::option(
            ContractRef::Occ("250822C00185000".into()),
            OrderSide::BuyToOpen,
            1,
            OrderType::Market,
        );
        assert_eq!(
            builder.build(&intent).await,
            Err(InvalidOrderIntent::EmptySymbol)
        );
    }

    #[tokio::test]
    async fn builder_rejects_wrong_asset_class() {
        let (builder, _) = builder();
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Market);
        assert_eq!(
            builder.build_option_order(&intent).await,
            Err(InvalidOrderIntent::AssetClassMismatch {
                expected: AssetClass::Option,
                actual: AssetClass::Equity,
            })
        );
    }

    #[tokio::test]
    async fn audit_outage_does_not_fail_build() {
        let (builder, sink) = builder();
        sink.set_available(false);
        let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Market);
        assert!(builder.build(&intent).await.is_ok());
        assert!(sink.is_empty());
    }
}
