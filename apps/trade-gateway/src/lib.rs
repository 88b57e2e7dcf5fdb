// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::redundant_clone
    )
)]

//! Trade Gateway - Order Construction & Execution Policy
//!
//! Turns normalized order intents into broker-ready requests and routes them
//! to the right broker endpoint, auditing every exchange.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure logic, no I/O
//!   - `option_symbol`: OCC symbol codec
//!   - `order`: Order intent, closed enumerations, broker payload
//!   - `policy`: Confirmation requirement and limit-price slippage
//!   - `audit`: Event and trade rows
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `BrokerPort`, `AuditSinkPort`
//!   - `services`: `OrderBuilder`, `AuditRecorder`
//!   - `use_cases`: `PlaceOrder`, `MarketData`, `Positions`
//!
//! - **Infrastructure**: Adapters
//!   - `broker`: Tradier router with separate data and trade profiles
//!   - `audit`: In-memory and log-backed sinks
//!   - `config`: Dependency injection container
//!
//! Configuration is loaded once by [`config::load_config`] and is immutable
//! afterwards.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases, services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Top-level error type.
pub mod error;

/// Logging and metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{
    AuditSinkError, AuditSinkPort, BrokerPort, BrokerProfile, BrokerRequest, BrokerRequestError,
    HttpMethod, NoOpAuditSink,
};
pub use application::services::{AuditRecorder, OrderBuilder};
pub use application::use_cases::{
    HistoryQuery, MarketDataUseCase, OrderSubmission, PlaceOrderUseCase, PositionsUseCase,
};
pub use config::{Config, ConfigError, load_config};
pub use domain::audit::{AuditDirection, AuditEvent, AuditKind, Correlation, TradeRecord};
pub use domain::option_symbol::{OccSymbol, OccSymbolError, OptionType};
pub use domain::order::{
    AssetClass, BrokerOrderPayload, ContractRef, Instrument, InvalidOrderIntent, OrderDuration,
    OrderIntent, OrderSide, OrderType, Session,
};
pub use domain::policy::{apply_slippage, requires_confirmation};
pub use error::GatewayError;
pub use infrastructure::{Container, InMemoryAuditSink, TracingAuditSink, TradierRouter};
