//! Audit records produced by the gateway.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Column layout of the events tab.
pub const EVENT_COLUMNS: [&str; 7] = [
    "timestamp",
    "kind",
    "direction",
    "actor",
    "channel_id",
    "user_id",
    "payload_json",
];

/// Column layout of the trades tab.
pub const TRADE_COLUMNS: [&str; 5] = ["timestamp", "action", "symbol", "qty", "details_json"];

/// Source category of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditKind {
    /// Broker request or response.
    Broker,
    /// Policy decision.
    Policy,
    /// Lifecycle or diagnostic notice.
    System,
}

impl AuditKind {
    /// Column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Broker => "broker",
            Self::Policy => "policy",
            Self::System => "system",
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction relative to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditDirection {
    /// Leaving the gateway.
    Out,
    /// Arriving at the gateway.
    In,
}

impl AuditDirection {
    /// Column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::In => "in",
        }
    }
}

impl fmt::Display for AuditDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional channel and user ids tying events to a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correlation {
    /// Channel the request came from.
    pub channel_id: Option<String>,
    /// User who issued the request.
    pub user_id: Option<String>,
}

impl Correlation {
    /// Correlation for a channel and user.
    #[must_use]
    pub fn new(channel_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            channel_id: Some(channel_id.into()),
            user_id: Some(user_id.into()),
        }
    }
}

/// One immutable audit event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    timestamp: DateTime<Utc>,
    kind: AuditKind,
    direction: AuditDirection,
    actor: String,
    correlation: Correlation,
    payload: Value,
}

impl AuditEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        kind: AuditKind,
        direction: AuditDirection,
        actor: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            direction,
            actor: actor.into(),
            correlation: Correlation::default(),
            payload,
        }
    }

    /// Attach correlation ids at creation time.
    #[must_use]
    pub fn with_correlation(mut self, correlation: Correlation) -> Self {
        self.correlation = correlation;
        self
    }

    /// Creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Event kind.
    #[must_use]
    pub const fn kind(&self) -> AuditKind {
        self.kind
    }

    /// Event direction.
    #[must_use]
    pub const fn direction(&self) -> AuditDirection {
        self.direction
    }

    /// Actor name.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Correlation ids.
    #[must_use]
    pub const fn correlation(&self) -> &Correlation {
        &self.correlation
    }

    /// Event payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Row in [`EVENT_COLUMNS`] order. Missing ids become empty strings.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            format_timestamp(self.timestamp),
            self.kind.as_str().to_string(),
            self.direction.as_str().to_string(),
            self.actor.clone(),
            self.correlation.channel_id.clone().unwrap_or_default(),
            self.correlation.user_id.clone().unwrap_or_default(),
            payload_text(&self.payload),
        ]
    }
}

/// A submitted trade, written to the trades tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    timestamp: DateTime<Utc>,
    action: String,
    symbol: String,
    quantity: u64,
    details: Value,
}

impl TradeRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(
        action: impl Into<String>,
        symbol: impl Into<String>,
        quantity: u64,
        details: Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            symbol: symbol.into(),
            quantity,
            details,
        }
    }

    /// Side of the trade.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Traded symbol (OCC symbol for options).
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Quantity.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Row in [`TRADE_COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            format_timestamp(self.timestamp),
            self.action.clone(),
            self.symbol.clone(),
            self.quantity.to_string(),
            payload_text(&self.details),
        ]
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strings are stored verbatim, everything else as compact JSON.
fn payload_text(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
