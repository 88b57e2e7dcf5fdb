//! Tradier broker request router.
//!
//! Implements `BrokerPort` over two independently configured profiles. Every
//! exchange is bracketed by audit events: one `out` before dispatch, one `in`
//! after the response (or transport failure), both carrying the same
//! `request_id`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::config::TradierConfig;
use super::http_client::{RawResponse, TradierHttpClient, TransportFailure};
use crate::application::ports::{BrokerPort, BrokerProfile, BrokerRequest, BrokerRequestError};
use crate::application::services::AuditRecorder;
use crate::domain::audit::{AuditDirection, AuditEvent, AuditKind, Correlation};
use crate::observability::record_broker_request;

/// Dual-profile router for the Tradier REST API.
#[derive(Debug)]
pub struct TradierRouter {
    config: TradierConfig,
    http: TradierHttpClient,
    audit: Arc<AuditRecorder>,
}

impl TradierRouter {
    /// Create a router. Credentials are checked per request, not here.
    pub fn new(config: TradierConfig, audit: Arc<AuditRecorder>) -> Result<Self, BrokerRequestError> {
        let http = TradierHttpClient::new(config.timeout)?;
        Ok(Self {
            config,
            http,
            audit,
        })
    }

    /// Router configuration.
    #[must_use]
    pub const fn config(&self) -> &TradierConfig {
        &self.config
    }

    async fn emit(
        &self,
        direction: AuditDirection,
        actor: &str,
        payload: Value,
        correlation: &Correlation,
    ) {
        let event = AuditEvent::new(AuditKind::Broker, direction, actor, payload)
            .with_correlation(correlation.clone());
        self.audit.record(&event).await;
    }
}

#[async_trait]
impl BrokerPort for TradierRouter {
    async fn send(&self, request: BrokerRequest) -> Result<Value, BrokerRequestError> {
        let profile = self.config.profile(request.profile);
        let client = profile.profile().as_str();

        // Fail fast on missing credentials, before anything is logged as sent.
        let token = profile.token()?;
        let path = profile.resolve_path(&request.endpoint)?;
        let url = profile.url(&path);

        let request_id = Uuid::new_v4().to_string();
        let method = request.method.as_str();

        tracing::debug!(client, method, endpoint = %path, request_id = %request_id, "Broker request");
        self.emit(
            AuditDirection::Out,
            self.audit.actor(),
            json!({
                "client": client,
                "request_id": request_id,
                "endpoint": path,
                "method": method,
                "params": pairs_to_json(&request.query),
                "data": pairs_to_json(&request.form),
            }),
            &request.correlation,
        )
        .await;

        let started = Instant::now();
        let outcome = self
            .http
            .execute(request.method, &url, token, &request.query, &request.form)
            .await;
        let elapsed = started.elapsed().as_secs_f64();

        let (in_payload, result) = match outcome {
            Ok(response) => classify(request.profile, response),
            Err(TransportFailure { message, timed_out }) => (
                json!({ "status": Value::Null, "error": message, "timed_out": timed_out }),
                Err(BrokerRequestError::Transport {
                    profile: request.profile,
                    message,
                    timed_out,
                }),
            ),
        };

        let outcome_label = match &result {
            Ok(_) => "ok",
            Err(BrokerRequestError::Status { .. }) => "status",
            Err(BrokerRequestError::Decode { .. }) => "decode",
            Err(_) => "transport",
        };
        record_broker_request(client, method, outcome_label, elapsed);

        if let Err(e) = &result {
            tracing::warn!(
                client,
                method,
                endpoint = %path,
                request_id = %request_id,
                error = %e,
                "Broker request failed"
            );
        }

        let mut payload = Map::new();
        payload.insert("client".into(), json!(client));
        payload.insert("request_id".into(), json!(request_id));
        if let Value::Object(fields) = in_payload {
            payload.extend(fields);
        }
        self.emit(
            AuditDirection::In,
            self.audit.broker_actor(),
            Value::Object(payload),
            &request.correlation,
        )
        .await;

        result
    }
}

/// Split a raw response into the `in` event fields and the caller's result.
fn classify(
    profile: BrokerProfile,
    response: RawResponse,
) -> (Value, Result<Value, BrokerRequestError>) {
    let success = response.is_success();
    let RawResponse { status, body } = response;

    if !success {
        return (
            json!({ "status": status, "body": body }),
            Err(BrokerRequestError::Status {
                profile,
                status,
                body,
            }),
        );
    }

    if body.trim().is_empty() {
        return (json!({ "status": status, "body": Value::Null }), Ok(Value::Null));
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(parsed) => (
            json!({ "status": status, "body": parsed.clone() }),
            Ok(parsed),
        ),
        Err(e) => (
            json!({ "status": status, "body": body, "error": e.to_string() }),
            Err(BrokerRequestError::Decode {
                profile,
                message: e.to_string(),
                body,
            }),
        ),
    }
}

/// Ordered pairs as a JSON object, or null when empty.
fn pairs_to_json(pairs: &[(String, String)]) -> Value {
    if pairs.is_empty() {
        return Value::Null;
    }
    Value::Object(
        pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}
