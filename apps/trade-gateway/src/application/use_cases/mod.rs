//! Use Cases
//!
//! Each use case is one self-contained exchange with the broker.

mod market_data;
mod place_order;
mod positions;

pub use market_data::{DEFAULT_HISTORY_INTERVAL, HistoryQuery, MarketDataUseCase};
pub use place_order::{OrderSubmission, PlaceOrderUseCase};
pub use positions::PositionsUseCase;
