//! Top-level error type for the trade gateway.
//!
//! Each layer keeps its own error enum; use cases surface them through
//! [`GatewayError`] so callers can match on the origin.

use thiserror::Error;

use crate::application::ports::BrokerRequestError;
use crate::domain::order::InvalidOrderIntent;

/// Errors returned by gateway use cases.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Order intent rejected locally. Nothing was sent.
    #[error(transparent)]
    InvalidOrderIntent(#[from] InvalidOrderIntent),

    /// Broker exchange failed.
    #[error(transparent)]
    Broker(#[from] BrokerRequestError),

    /// Query arguments rejected before sending.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl GatewayError {
    /// Whether the failure happened before anything reached the network.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Broker(_))
    }

    /// Broker HTTP status, for non-2xx failures.
    #[must_use]
    pub const fn broker_status(&self) -> Option<u16> {
        match self {
            Self::Broker(e) => e.status(),
            _ => None,
        }
    }
}
