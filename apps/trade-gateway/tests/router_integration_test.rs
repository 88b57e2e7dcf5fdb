//! Broker Router Integration Tests
//!
//! Runs the Tradier router against local mock HTTP servers and checks what
//! reaches the wire and what reaches the audit log:
//! - Data and trade requests go to their own base URL with their own token
//! - Every exchange writes one `out` then one `in` event
//! - Non-2xx responses surface status and body unchanged
//! - Order placement posts a form body and writes a trade row
//! - Missing credentials fail before anything is sent

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::{Value, json};
use trade_gateway::config::{Config, PolicyConfig};
use trade_gateway::{
    BrokerRequestError, Container, ContractRef, Correlation, GatewayError, InMemoryAuditSink,
    OrderIntent, OrderSide, OrderType, Session, TradierRouter,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    container: Container<TradierRouter>,
    sink: Arc<InMemoryAuditSink>,
}

fn harness(data: &MockServer, trade: &MockServer, policy: PolicyConfig) -> Harness {
    let mut config = Config::default();
    config.brokers.data.base_url = data.uri();
    config.brokers.data.token = "data-token".into();
    config.brokers.trade.base_url = trade.uri();
    config.brokers.trade.token = "trade-token".into();
    config.brokers.trade.account_id = "VA123".into();
    config.policy = policy;
    harness_with(config)
}

fn harness_with(config: Config) -> Harness {
    let sink = Arc::new(InMemoryAuditSink::new());
    let container = Container::from_config(&config, sink.clone()).expect("router should build");
    Harness { container, sink }
}

/// `(direction, actor, payload)` of every event row.
fn events(sink: &InMemoryAuditSink) -> Vec<(String, String, Value)> {
    sink.rows("Events")
        .into_iter()
        .map(|row| {
            let payload = serde_json::from_str(&row[6]).expect("payload is JSON");
            (row[2].clone(), row[3].clone(), payload)
        })
        .collect()
}

// ============================================
// Market data (DATA profile)
// ============================================

#[tokio::test]
async fn quote_writes_one_out_then_one_in_event() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/quotes"))
        .and(query_param("symbols", "AAPL"))
        .and(header("authorization", "Bearer data-token"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"quotes": {"quote": {"symbol": "AAPL"}}})),
        )
        .expect(1)
        .mount(&data)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let body = h
        .container
        .market_data_use_case()
        .quotes(&["aapl"], Correlation::new("chan-1", "user-1"))
        .await
        .unwrap();
    assert_eq!(body["quotes"]["quote"]["symbol"], "AAPL");

    let events = events(&h.sink);
    assert_eq!(events.len(), 2);

    let (out_dir, out_actor, out) = &events[0];
    assert_eq!(out_dir, "out");
    assert_eq!(out_actor, "bot");
    assert_eq!(out["client"], "DATA");
    assert_eq!(out["endpoint"], "/markets/quotes");
    assert_eq!(out["method"], "GET");
    assert_eq!(out["params"], json!({"symbols": "AAPL"}));

    let (in_dir, in_actor, inbound) = &events[1];
    assert_eq!(in_dir, "in");
    assert_eq!(in_actor, "tradier");
    assert_eq!(inbound["status"], 200);
    assert_eq!(inbound["body"], body);
    assert_eq!(inbound["request_id"], out["request_id"]);

    let rows = h.sink.rows("Events");
    assert!(rows.iter().all(|row| row[4] == "chan-1" && row[5] == "user-1"));
    assert!(trade.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_success_keeps_status_and_body() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/options/chains"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid Parameter: expiration"))
        .mount(&data)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let expiration = chrono::NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
    let err = h
        .container
        .market_data_use_case()
        .option_chain("AMD", expiration, Correlation::default())
        .await
        .unwrap_err();

    match err {
        GatewayError::Broker(BrokerRequestError::Status { status, body, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "Invalid Parameter: expiration");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let events = events(&h.sink);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].2["status"], 400);
    assert_eq!(events[1].2["body"], "Invalid Parameter: expiration");
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/history"))
        .and(query_param("interval", "hour"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&data)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let body = h
        .container
        .market_data_use_case()
        .history(
            trade_gateway::HistoryQuery::new("SPY"),
            Correlation::default(),
        )
        .await
        .unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn timeout_is_a_transport_error_with_in_event() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/quotes"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&data)
        .await;

    let mut config = Config::default();
    config.brokers.data.base_url = data.uri();
    config.brokers.data.token = "data-token".into();
    config.brokers.trade.base_url = trade.uri();
    config.brokers.timeout_secs = 1;
    let h = harness_with(config);

    let err = h
        .container
        .market_data_use_case()
        .quotes(&["AAPL"], Correlation::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Broker(BrokerRequestError::Transport { timed_out: true, .. })
    ));

    let events = events(&h.sink);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].2["timed_out"], true);
}

// ============================================
// Trading (TRADE profile)
// ============================================

#[tokio::test]
async fn equity_order_posts_form_to_account() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/VA123/orders"))
        .and(header("authorization", "Bearer trade-token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("class=equity"))
        .and(body_string_contains("symbol=AAPL"))
        .and(body_string_contains("side=buy"))
        .and(body_string_contains("quantity=10"))
        .and(body_string_contains("type=limit"))
        .and(body_string_contains("price=100.5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"order": {"id": 1001, "status": "ok"}})),
        )
        .expect(1)
        .mount(&trade)
        .await;

    let policy = PolicyConfig {
        limit_slippage_bps: dec!(50),
        ..PolicyConfig::default()
    };
    let h = harness(&data, &trade, policy);
    let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 10, OrderType::Limit)
        .with_limit_price(dec!(100.00));

    let submission = h.container.place_order_use_case().execute(intent).await.unwrap();
    assert_eq!(submission.response["order"]["id"], 1001);
    assert!(!submission.confirmation_required);

    let events = events(&h.sink);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].2["client"], "TRADE");
    assert_eq!(events[0].2["endpoint"], "/accounts/VA123/orders");
    assert_eq!(events[0].2["data"]["price"], "100.5");

    let trades = h.sink.rows("Trades");
    assert_eq!(trades.len(), 1);
    assert_eq!(&trades[0][1..4], ["buy", "AAPL", "10"]);
    assert!(data.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn extended_toggle_reaches_the_wire() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/VA123/orders"))
        .and(body_string_contains("session=EXT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": {"id": 1}})))
        .expect(1)
        .mount(&trade)
        .await;

    let policy = PolicyConfig {
        extended_hours_enabled: true,
        ..PolicyConfig::default()
    };
    let h = harness(&data, &trade, policy);
    let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 1, OrderType::Limit)
        .with_limit_price(dec!(190))
        .with_session(Session::Regular);

    let submission = h.container.place_order_use_case().execute(intent).await.unwrap();
    assert_eq!(submission.payload.session(), Session::Extended);
}

#[tokio::test]
async fn market_option_order_logs_policy_then_broker_events() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/VA123/orders"))
        .and(body_string_contains("class=option"))
        .and(body_string_contains("symbol=AMD"))
        .and(body_string_contains("option_symbol=AMD250822C00185000"))
        .and(body_string_contains("side=buy_to_open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": {"id": 5}})))
        .expect(1)
        .mount(&trade)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let intent = OrderIntent::option(
        ContractRef::Occ("AMD250822C00185000".into()),
        OrderSide::BuyToOpen,
        2,
        OrderType::Market,
    );

    let submission = h.container.place_order_use_case().execute(intent).await.unwrap();
    assert!(submission.confirmation_required);

    let rows = h.sink.rows("Events");
    let kinds: Vec<(&str, &str)> = rows.iter().map(|r| (r[1].as_str(), r[2].as_str())).collect();
    assert_eq!(kinds, [("policy", "out"), ("broker", "out"), ("broker", "in")]);

    let trades = h.sink.rows("Trades");
    assert_eq!(trades[0][2], "AMD250822C00185000");
}

#[tokio::test]
async fn rejected_order_surfaces_body_and_skips_trade_row() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/VA123/orders"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Account is not enabled"))
        .mount(&trade)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let intent = OrderIntent::equity("AAPL", OrderSide::Sell, 1, OrderType::Limit)
        .with_limit_price(dec!(200));

    let err = h.container.place_order_use_case().execute(intent).await.unwrap_err();
    assert_eq!(err.broker_status(), Some(403));
    assert!(err.to_string().contains("Account is not enabled"));
    assert!(h.sink.rows("Trades").is_empty());
}

#[tokio::test]
async fn invalid_intent_sends_nothing() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;

    let h = harness(&data, &trade, PolicyConfig::default());
    let intent = OrderIntent::equity("AAPL", OrderSide::Buy, 0, OrderType::Market);

    let err = h.container.place_order_use_case().execute(intent).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidOrderIntent(_)));
    assert!(trade.received_requests().await.unwrap().is_empty());
    assert!(h.sink.is_empty());
}

// ============================================
// Credentials
// ============================================

#[tokio::test]
async fn missing_token_fails_before_sending() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;

    let mut config = Config::default();
    config.brokers.data.base_url = data.uri();
    config.brokers.trade.base_url = trade.uri();
    let h = harness_with(config);

    let err = h
        .container
        .market_data_use_case()
        .quotes(&["AAPL"], Correlation::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Broker(BrokerRequestError::MissingCredentials { field: "token", .. })
    ));
    assert!(data.received_requests().await.unwrap().is_empty());
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn missing_account_fails_before_sending() {
    let trade = MockServer::start().await;

    let mut config = Config::default();
    config.brokers.trade.base_url = trade.uri();
    config.brokers.trade.token = "trade-token".into();
    let h = harness_with(config);

    let err = h
        .container
        .positions_use_case()
        .execute(Correlation::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Broker(BrokerRequestError::MissingCredentials {
            field: "account_id",
            ..
        })
    ));
    assert!(trade.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn audit_outage_does_not_fail_the_exchange() {
    let data = MockServer::start().await;
    let trade = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/VA123/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"positions": "null"})))
        .mount(&trade)
        .await;

    let h = harness(&data, &trade, PolicyConfig::default());
    h.sink.set_available(false);

    let body = h
        .container
        .positions_use_case()
        .execute(Correlation::default())
        .await
        .unwrap();
    assert_eq!(body["positions"], "null");
    assert!(h.sink.is_empty());
}
