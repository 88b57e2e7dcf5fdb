//! HTTP client wrapper for the Tradier REST API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method};

use crate::application::ports::{BrokerRequestError, HttpMethod};

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TransportFailure {
    pub message: String,
    pub timed_out: bool,
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        Self {
            timed_out: e.is_timeout(),
            message: e.to_string(),
        }
    }
}

/// Single reqwest client shared by both profiles.
///
/// Sends bearer-authenticated requests expecting JSON. Query parameters are
/// URL-encoded; form fields go in an `application/x-www-form-urlencoded` body.
/// No retries.
#[derive(Debug, Clone)]
pub(super) struct TradierHttpClient {
    client: Client,
}

impl TradierHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, BrokerRequestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BrokerRequestError::ClientInit {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        token: &str,
        query: &[(String, String)],
        form: &[(String, String)],
    ) -> Result<RawResponse, TransportFailure> {
        let mut request = self
            .client
            .request(to_method(method), url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if !form.is_empty() {
            request = request.form(form);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}
