//! Market Data Use Case
//!
//! Read-only lookups on the data profile. Responses are returned exactly as
//! the broker sent them.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::application::ports::{BrokerPort, BrokerProfile, BrokerRequest, endpoints};
use crate::domain::audit::Correlation;
use crate::error::GatewayError;

/// Default bar interval for history requests.
pub const DEFAULT_HISTORY_INTERVAL: &str = "hour";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters of a history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Ticker symbol.
    pub symbol: String,
    /// Bar interval.
    pub interval: String,
    /// First day, inclusive.
    pub start: Option<NaiveDate>,
    /// Last day, inclusive.
    pub end: Option<NaiveDate>,
}

impl HistoryQuery {
    /// History at the default interval with no date bounds.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: DEFAULT_HISTORY_INTERVAL.to_string(),
            start: None,
            end: None,
        }
    }

    /// Set the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    /// Bound the range.
    #[must_use]
    pub const fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Use case for quotes, option chains and price history.
pub struct MarketDataUseCase<B>
where
    B: BrokerPort,
{
    broker: Arc<B>,
}

impl<B> MarketDataUseCase<B>
where
    B: BrokerPort,
{
    /// Create a new `MarketDataUseCase`.
    pub const fn new(broker: Arc<B>) -> Self {
        Self { broker }
    }

    /// Quotes for one or more symbols.
    pub async fn quotes(
        &self,
        symbols: &[&str],
        correlation: Correlation,
    ) -> Result<Value, GatewayError> {
        let symbols: Vec<String> = symbols
            .iter()
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err(GatewayError::InvalidQuery(
                "at least one symbol is required".to_string(),
            ));
        }

        let request = BrokerRequest::get(BrokerProfile::Data, endpoints::QUOTES)
            .with_query("symbols", symbols.join(","))
            .with_correlation(correlation);
        Ok(self.broker.send(request).await?)
    }

    /// Option chain with greeks for one underlying and expiration.
    pub async fn option_chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        correlation: Correlation,
    ) -> Result<Value, GatewayError> {
        let symbol = required_symbol(symbol)?;
        let request = BrokerRequest::get(BrokerProfile::Data, endpoints::OPTION_CHAINS)
            .with_query("symbol", symbol)
            .with_query("expiration", expiration.format(DATE_FORMAT).to_string())
            .with_query("greeks", "true")
            .with_correlation(correlation);
        Ok(self.broker.send(request).await?)
    }

    /// Historical bars. Absent bounds are not sent.
    pub async fn history(
        &self,
        query: HistoryQuery,
        correlation: Correlation,
    ) -> Result<Value, GatewayError> {
        let symbol = required_symbol(&query.symbol)?;
        if let (Some(start), Some(end)) = (query.start, query.end)
            && start > end
        {
            return Err(GatewayError::InvalidQuery(format!(
                "history start {start} is after end {end}"
            )));
        }

        let mut request = BrokerRequest::get(BrokerProfile::Data, endpoints::HISTORY)
            .with_query("symbol", symbol)
            .with_query("interval", query.interval)
            .with_correlation(correlation);
        if let Some(start) = query.start {
            request = request.with_query("start", start.format(DATE_FORMAT).to_string());
        }
        if let Some(end) = query.end {
            request = request.with_query("end", end.format(DATE_FORMAT).to_string());
        }
        Ok(self.broker.send(request).await?)
    }
}

fn required_symbol(symbol: &str) -> Result<String, GatewayError> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(GatewayError::InvalidQuery("symbol is required".to_string()));
    }
    Ok(symbol)
}
