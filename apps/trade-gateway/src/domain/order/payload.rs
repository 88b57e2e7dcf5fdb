//! Wire-ready order record for the trade endpoint.

use rust_decimal::Decimal;

use super::value_objects::{AssetClass, OrderDuration, OrderSide, OrderType, Session};

/// Broker order payload.
///
/// Built once per intent by the order builder and never mutated afterwards;
/// fields are read through accessors only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerOrderPayload {
    pub(crate) class: AssetClass,
    pub(crate) symbol: String,
    pub(crate) option_symbol: Option<String>,
    pub(crate) side: OrderSide,
    pub(crate) quantity: u64,
    pub(crate) order_type: OrderType,
    pub(crate) duration: OrderDuration,
    pub(crate) session: Session,
    pub(crate) price: Option<Decimal>,
    pub(crate) stop: Option<Decimal>,
}

impl BrokerOrderPayload {
    /// Asset class.
    #[must_use]
    pub const fn class(&self) -> AssetClass {
        self.class
    }

    /// Ticker (the underlying for options).
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// OCC symbol for option orders.
    #[must_use]
    pub fn option_symbol(&self) -> Option<&str> {
        self.option_symbol.as_deref()
    }

    /// Symbol recorded in the trade log: the OCC symbol for options.
    #[must_use]
    pub fn traded_symbol(&self) -> &str {
        self.option_symbol.as_deref().unwrap_or(&self.symbol)
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Quantity.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Duration.
    #[must_use]
    pub const fn duration(&self) -> OrderDuration {
        self.duration
    }

    /// Session.
    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }

    /// Limit price after slippage.
    #[must_use]
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Stop trigger price.
    #[must_use]
    pub const fn stop(&self) -> Option<Decimal> {
        self.stop
    }

    /// Ordered form fields for the `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("class".to_string(), self.class.as_str().to_string()),
            ("symbol".to_string(), self.symbol.clone()),
        ];
        if let Some(occ) = &self.option_symbol {
            fields.push(("option_symbol".to_string(), occ.clone()));
        }
        fields.extend([
            ("side".to_string(), self.side.as_str().to_string()),
            ("quantity".to_string(), self.quantity.to_string()),
            ("type".to_string(), self.order_type.as_str().to_string()),
            ("duration".to_string(), self.duration.as_str().to_string()),
            ("session".to_string(), self.session.as_str().to_string()),
        ]);
        if let Some(price) = self.price {
            fields.push(("price".to_string(), price.normalize().to_string()));
        }
        if let Some(stop) = self.stop {
            fields.push(("stop".to_string(), stop.normalize().to_string()));
        }
        fields
    }
}
