//! Domain Layer
//!
//! Business rules with no I/O. Everything here is deterministic and
//! side-effect free.
//!
//! # Bounded Contexts
//!
//! - [`option_symbol`]: OCC option symbol encoding and parsing
//! - [`order`]: Order intents, broker payloads and their value objects
//! - [`policy`]: Confirmation requirement and limit-price slippage
//! - [`audit`]: Audit event and trade log records

pub mod audit;
pub mod option_symbol;
pub mod order;
pub mod policy;
