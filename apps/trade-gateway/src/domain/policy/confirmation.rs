//! Human confirmation requirement.

use crate::domain::order::OrderType;

/// Decide whether an order needs human sign-off before submission.
///
/// - Strict mode off: every order needs confirmation.
/// - Conditional orders do not execute now and never need it.
/// - Otherwise only `market` orders need it; priced orders are pre-approved.
///
/// The decision is advisory. Callers enforce it; the builder only records it.
#[must_use]
pub const fn requires_confirmation(
    order_type: OrderType,
    is_conditional: bool,
    strict_mode: bool,
) -> bool {
    if !strict_mode {
        return true;
    }
    if is_conditional {
        return false;
    }
    order_type.is_market()
}
