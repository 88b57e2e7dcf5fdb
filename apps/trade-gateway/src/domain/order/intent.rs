//! Caller-supplied order intent.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::InvalidOrderIntent;
use super::value_objects::{AssetClass, OrderDuration, OrderSide, OrderType, Session};
use crate::domain::audit::Correlation;
use crate::domain::option_symbol::OptionType;

/// How an option contract is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractRef {
    /// Precomputed OCC symbol, passed through as given (uppercased).
    Occ(String),
    /// Contract terms, encoded against the intent's underlying.
    Terms {
        /// Expiration date.
        expiry: NaiveDate,
        /// Call or put.
        option_type: OptionType,
        /// Strike price.
        strike: Decimal,
    },
}

/// What is being traded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instrument {
    /// Equity by ticker.
    Equity {
        /// Ticker symbol.
        symbol: String,
    },
    /// Option contract.
    Option {
        /// Explicit underlying ticker. Inferred from the OCC symbol when absent.
        underlying: Option<String>,
        /// Contract identification.
        contract: ContractRef,
    },
}

/// Normalized order request handed to the order builder.
///
/// Owned by the caller and consumed by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    /// Instrument to trade.
    pub instrument: Instrument,
    /// Order side.
    pub side: OrderSide,
    /// Number of shares or contracts.
    pub quantity: i64,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price for `limit` / `stop_limit`.
    pub limit_price: Option<Decimal>,
    /// Stop trigger for `stop` / `stop_limit`.
    pub stop_price: Option<Decimal>,
    /// Order duration.
    pub duration: OrderDuration,
    /// Requested session. The extended-hours toggle overrides it.
    pub session: Session,
    /// Contingent on a future trigger rather than an immediate action.
    pub is_conditional: bool,
    /// Channel/user ids copied onto audit events.
    pub correlation: Correlation,
}

impl OrderIntent {
    /// Equity order for a ticker.
    #[must_use]
    pub fn equity(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: i64,
        order_type: OrderType,
    ) -> Self {
        Self::with_instrument(
            Instrument::Equity {
                symbol: symbol.into(),
            },
            side,
            quantity,
            order_type,
        )
    }

    /// Option order for a contract.
    #[must_use]
    pub fn option(
        contract: ContractRef,
        side: OrderSide,
        quantity: i64,
        order_type: OrderType,
    ) -> Self {
        Self::with_instrument(
            Instrument::Option {
                underlying: None,
                contract,
            },
            side,
            quantity,
            order_type,
        )
    }

    fn with_instrument(
        instrument: Instrument,
        side: OrderSide,
        quantity: i64,
        order_type: OrderType,
    ) -> Self {
        Self {
            instrument,
            side,
            quantity,
            order_type,
            limit_price: None,
            stop_price: None,
            duration: OrderDuration::default(),
            session: Session::default(),
            is_conditional: false,
            correlation: Correlation::default(),
        }
    }

    /// Set the explicit underlying. No effect on equity intents.
    #[must_use]
    pub fn with_underlying(mut self, ticker: impl Into<String>) -> Self {
        if let Instrument::Option { underlying, .. } = &mut self.instrument {
            *underlying = Some(ticker.into());
        }
        self
    }

    /// Set the limit price.
    #[must_use]
    pub const fn with_limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    /// Set the stop price.
    #[must_use]
    pub const fn with_stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    /// Set the duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: OrderDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the requested session.
    #[must_use]
    pub const fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Mark the order as conditional.
    #[must_use]
    pub const fn conditional(mut self, is_conditional: bool) -> Self {
        self.is_conditional = is_conditional;
        self
    }

    /// Attach channel/user correlation ids.
    #[must_use]
    pub fn with_correlation(mut self, correlation: Correlation) -> Self {
        self.correlation = correlation;
        self
    }

    /// Asset class implied by the instrument.
    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        match self.instrument {
            Instrument::Equity { .. } => AssetClass::Equity,
            Instrument::Option { .. } => AssetClass::Option,
        }
    }

    /// Check the intent invariants.
    pub fn validate(&self) -> Result<(), InvalidOrderIntent> {
        if self.quantity <= 0 {
            return Err(InvalidOrderIntent::NonPositiveQuantity(self.quantity));
        }

        let asset_class = self.asset_class();
        if !self.side.is_valid_for(asset_class) {
            return Err(InvalidOrderIntent::SideNotAllowed {
                side: self.side,
                asset_class,
            });
        }

        match &self.instrument {
            Instrument::Equity { symbol } if symbol.trim().is_empty() => {
                return Err(InvalidOrderIntent::EmptySymbol);
            }
            Instrument::Option {
                contract: ContractRef::Occ(occ),
                ..
            } if occ.trim().is_empty() => return Err(InvalidOrderIntent::EmptySymbol),
            _ => {}
        }

        if self.order_type.requires_limit_price() {
            let price = self
                .limit_price
                .ok_or(InvalidOrderIntent::MissingLimitPrice {
                    order_type: self.order_type,
                })?;
            ensure_positive("limit price", price)?;
        }

        if self.order_type.requires_stop_price() {
            let price = self
                .stop_price
                .ok_or(InvalidOrderIntent::MissingStopPrice {
                    order_type: self.order_type,
                })?;
            ensure_positive("stop price", price)?;
        }

        Ok(())
    }
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), InvalidOrderIntent> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(InvalidOrderIntent::NonPositivePrice { field, value })
    }
}
