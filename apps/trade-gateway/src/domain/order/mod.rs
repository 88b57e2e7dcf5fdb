//! Order intents and broker payloads.
//!
//! An [`OrderIntent`] is what the caller wants; a [`BrokerOrderPayload`] is
//! what the broker receives. The order builder sits between the two.

mod errors;
mod intent;
mod payload;
pub mod value_objects;

pub use errors::InvalidOrderIntent;
pub use intent::{ContractRef, Instrument, OrderIntent};
pub use payload::BrokerOrderPayload;
pub use value_objects::{AssetClass, OrderDuration, OrderSide, OrderType, Session};
