//! Application Layer
//!
//! Orchestrates the domain through use cases. It defines:
//!
//! - **Ports**: Interfaces to the broker and the audit log
//! - **Services**: Order building and audit recording
//! - **Use Cases**: Order placement, market data, positions

pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::*;
pub use services::*;
pub use use_cases::*;
