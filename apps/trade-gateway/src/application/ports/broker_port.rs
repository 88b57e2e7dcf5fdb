//! Broker Port (Driven Port)
//!
//! Interface for sending raw requests to the brokerage. Every request names
//! the profile it belongs to; the adapter resolves the base URL and token and
//! brackets the exchange with audit events.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::domain::audit::Correlation;

/// Broker endpoints used by the gateway.
pub mod endpoints {
    /// Quotes for one or more comma-separated symbols.
    pub const QUOTES: &str = "/markets/quotes";
    /// Option chain for one underlying and expiry.
    pub const OPTION_CHAINS: &str = "/markets/options/chains";
    /// Historical bars.
    pub const HISTORY: &str = "/markets/history";
    /// Order placement for the configured account.
    pub const ORDERS: &str = "/accounts/{account}/orders";
    /// Open positions for the configured account.
    pub const POSITIONS: &str = "/accounts/{account}/positions";
}

/// Which credential set a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokerProfile {
    /// Read-only market data.
    Data,
    /// Order placement and account state.
    Trade,
}

impl BrokerProfile {
    /// Label used in audit payloads and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "DATA",
            Self::Trade => "TRADE",
        }
    }
}

impl fmt::Display for BrokerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of a broker request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET with query parameters.
    Get,
    /// POST with a form body.
    Post,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the broker.
///
/// `endpoint` is a path relative to the profile's base URL and may contain the
/// `{account}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerRequest {
    /// Credential profile.
    pub profile: BrokerProfile,
    /// HTTP method.
    pub method: HttpMethod,
    /// Relative endpoint path.
    pub endpoint: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Form body fields.
    pub form: Vec<(String, String)>,
    /// Correlation ids copied onto both audit events.
    pub correlation: Correlation,
}

impl BrokerRequest {
    /// GET request.
    #[must_use]
    pub fn get(profile: BrokerProfile, endpoint: impl Into<String>) -> Self {
        Self::new(profile, HttpMethod::Get, endpoint)
    }

    /// POST request.
    #[must_use]
    pub fn post(profile: BrokerProfile, endpoint: impl Into<String>) -> Self {
        Self::new(profile, HttpMethod::Post, endpoint)
    }

    fn new(profile: BrokerProfile, method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            profile,
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            form: Vec::new(),
            correlation: Correlation::default(),
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Replace the form body.
    #[must_use]
    pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
        self.form = form;
        self
    }

    /// Attach correlation ids.
    #[must_use]
    pub fn with_correlation(mut self, correlation: Correlation) -> Self {
        self.correlation = correlation;
        self
    }
}

/// Broker request failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerRequestError {
    /// Non-2xx response. The body is kept verbatim.
    #[error("{profile} request failed with status {status}: {body}")]
    Status {
        /// Profile the request used.
        profile: BrokerProfile,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Connection failure or timeout.
    #[error("{profile} transport error: {message}")]
    Transport {
        /// Profile the request used.
        profile: BrokerProfile,
        /// Error details.
        message: String,
        /// Whether the request hit the configured timeout.
        timed_out: bool,
    },

    /// 2xx response whose body is not JSON.
    #[error("{profile} response is not valid JSON: {message}")]
    Decode {
        /// Profile the request used.
        profile: BrokerProfile,
        /// Parser message.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Token or account id missing for the profile.
    #[error("{profile} profile is missing {field}")]
    MissingCredentials {
        /// Profile the request used.
        profile: BrokerProfile,
        /// Missing setting.
        field: &'static str,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client initialization failed: {message}")]
    ClientInit {
        /// Error details.
        message: String,
    },
}

impl BrokerRequestError {
    /// HTTP status for [`Self::Status`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Port for broker interactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerPort: Send + Sync {
    /// Send one request and return the decoded JSON body.
    ///
    /// An empty 2xx body decodes to `Value::Null`.
    async fn send(&self, request: BrokerRequest) -> Result<Value, BrokerRequestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders_accumulate() {
        let request = BrokerRequest::get(BrokerProfile::Data, endpoints::QUOTES)
            .with_query("symbols", "AAPL,MSFT")
            .with_correlation(Correlation::new("c", "u"));

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.query, [("symbols".to_string(), "AAPL,MSFT".to_string())]);
        assert!(request.form.is_empty());
        assert_eq!(request.correlation.user_id.as_deref(), Some("u"));
    }

    #[test]
    fn status_error_keeps_body() {
        let err = BrokerRequestError::Status {
            profile: BrokerProfile::Trade,
            status: 400,
            body: "bad symbol".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some("bad symbol"));
        assert_eq!(err.to_string(), "TRADE request failed with status 400: bad symbol");
    }

    #[test]
    fn missing_credentials_has_no_status() {
        let err = BrokerRequestError::MissingCredentials {
            profile: BrokerProfile::Data,
            field: "token",
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
