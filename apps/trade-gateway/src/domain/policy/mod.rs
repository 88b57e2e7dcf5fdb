//! Pre-dispatch execution policy.

mod confirmation;
mod slippage;

pub use confirmation::requires_confirmation;
pub use slippage::{adjusts_limit_price, apply_slippage};
