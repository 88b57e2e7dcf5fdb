//! Limit-price slippage adjustment.

use rust_decimal::Decimal;

use crate::domain::order::OrderType;

/// Basis points divisor (1 bp = 0.0001).
const BPS_DIVISOR: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Adjust a price by `slippage_bps` basis points: `price * (1 + bps / 10000)`.
///
/// Zero basis points returns `price` untouched. Returns `None` when the
/// adjusted price does not fit a `Decimal`.
#[must_use]
pub fn apply_slippage(price: Decimal, slippage_bps: Decimal) -> Option<Decimal> {
    if slippage_bps.is_zero() {
        return Some(price);
    }
    let factor = slippage_bps
        .checked_div(BPS_DIVISOR)
        .and_then(|fraction| Decimal::ONE.checked_add(fraction))?;
    price.checked_mul(factor)
}

/// Whether slippage applies to this order type's limit price.
///
/// Only `limit` and `stop_limit` carry a limit price. Stop triggers are
/// never adjusted.
#[must_use]
pub const fn adjusts_limit_price(order_type: OrderType) -> bool {
    order_type.requires_limit_price()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_bps_is_exact_no_op() {
        let price = dec!(100.00);
        let adjusted = apply_slippage(price, Decimal::ZERO).unwrap();
        assert_eq!(adjusted, price);
        assert_eq!(adjusted.scale(), price.scale());
    }

    #[test]
    fn fifty_bps_moves_price_half_percent() {
        assert_eq!(apply_slippage(dec!(100.00), dec!(50)), Some(dec!(100.50)));
    }

    #[test]
    fn negative_bps_lowers_price() {
        assert_eq!(apply_slippage(dec!(200), dec!(-25)), Some(dec!(199.5)));
    }

    #[test]
    fn fractional_bps() {
        assert_eq!(apply_slippage(dec!(10), dec!(2.5)), Some(dec!(10.025)));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(apply_slippage(Decimal::MAX, dec!(50)), None);
        assert_eq!(apply_slippage(Decimal::MAX, Decimal::ZERO), Some(Decimal::MAX));
    }

    #[test]
    fn only_limit_prices_adjust() {
        assert!(adjusts_limit_price(OrderType::Limit));
        assert!(adjusts_limit_price(OrderType::StopLimit));
        assert!(!adjusts_limit_price(OrderType::Stop));
        assert!(!adjusts_limit_price(OrderType::Market));
    }
}
