//! Order value objects.

mod asset_class;
mod order_duration;
mod order_side;
mod order_type;
mod session;

pub use asset_class::AssetClass;
pub use order_duration::OrderDuration;
pub use order_side::OrderSide;
pub use order_type::OrderType;
pub use session::Session;
