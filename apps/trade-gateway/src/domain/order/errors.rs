//! Order intent validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::{AssetClass, OrderSide, OrderType};
use crate::domain::option_symbol::OccSymbolError;

/// An order intent that cannot become a broker payload.
///
/// Raised before anything reaches the network and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOrderIntent {
    /// Quantity is zero or negative.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// Limit or stop_limit order without a limit price.
    #[error("{order_type} order requires a limit price")]
    MissingLimitPrice {
        /// Order type that needs the price.
        order_type: OrderType,
    },

    /// Stop or stop_limit order without a stop price.
    #[error("{order_type} order requires a stop price")]
    MissingStopPrice {
        /// Order type that needs the price.
        order_type: OrderType,
    },

    /// A price field is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositivePrice {
        /// Price field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A price cannot be adjusted without overflowing.
    #[error("{field} {value} is out of range after slippage")]
    PriceOutOfRange {
        /// Price field name.
        field: &'static str,
        /// Price before adjustment.
        value: Decimal,
    },

    /// String value outside a closed enumeration.
    #[error("unknown {field} value: {value:?}")]
    UnknownValue {
        /// Field being parsed.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// Side belongs to the other asset class.
    #[error("side {side} is not valid for {asset_class} orders")]
    SideNotAllowed {
        /// Requested side.
        side: OrderSide,
        /// Asset class of the intent.
        asset_class: AssetClass,
    },

    /// Intent handed to the builder for the wrong asset class.
    #[error("expected an {expected} intent, got {actual}")]
    AssetClassMismatch {
        /// Asset class the builder handles.
        expected: AssetClass,
        /// Asset class of the intent.
        actual: AssetClass,
    },

    /// Ticker or OCC symbol is empty.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Structured option terms were given without an underlying.
    #[error("option contract terms need an explicit underlying")]
    MissingUnderlying,

    /// Option contract terms could not be encoded.
    #[error("invalid option contract: {0}")]
    InvalidContract(#[from] OccSymbolError),
}

impl InvalidOrderIntent {
    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            field,
            value: value.to_string(),
        }
    }
}
