use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use indian_market_data::MarketDataConfig;
use indian_market_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tower::ServiceExt;

fn build_test_router() -> Router {
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        log_format: "text".to_string(),
        market: MarketDataConfig {
            offline: true,
            mock_seed: Some(42),
            ..Default::default()
        },
    };
    let state = build_state(&config).unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_test_router();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn stock_lookup_returns_tagged_record() {
    let app = build_test_router();

    let (status, body) = get(&app, "/api/v1/market/stocks/reliance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "RELIANCE");
    assert_eq!(body["exchange"], "NSE");
    assert_eq!(body["provenance"], "mock");
    assert_eq!(body["sector"], "Energy");
    assert!(body["price"].as_f64().unwrap() > 0.0);

    let (status, body) = get(&app, "/api/v1/market/stocks/TCS?exchange=bse").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exchange"], "BSE");
    assert!(body.get("volume").is_none());
}

#[tokio::test]
async fn repeated_stock_lookup_is_served_from_cache() {
    let app = build_test_router();

    let (_, first) = get(&app, "/api/v1/market/stocks/INFY").await;
    let (_, second) = get(&app, "/api/v1/market/stocks/INFY").await;
    assert_eq!(first, second);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/market/stocks/INFY/cache").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_exchange_is_rejected() {
    let app = build_test_router();
    let (status, body) = get(&app, "/api/v1/market/stocks/TCS?exchange=LSE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn blank_symbol_is_not_found() {
    let app = build_test_router();
    let (status, body) = get(&app, "/api/v1/market/stocks/%20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn indices_and_overview_are_populated() {
    let app = build_test_router();

    let (status, body) = get(&app, "/api/v1/market/indices").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"NIFTY 50"));
    assert!(names.contains(&"SENSEX"));

    let (status, body) = get(&app, "/api/v1/market/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["indices"].as_array().unwrap().is_empty());
    assert!(!body["gainers"].as_array().unwrap().is_empty());
    assert!(!body["losers"].as_array().unwrap().is_empty());
    assert!(!body["mostActive"].as_array().unwrap().is_empty());
    assert!(body["status"].is_string());
}

#[tokio::test]
async fn status_is_a_known_session_state() {
    let app = build_test_router();
    let (status, body) = get(&app, "/api/v1/market/status").await;
    assert_eq!(status, StatusCode::OK);
    let value = body["status"].as_str().unwrap();
    assert!(["OPEN", "PRE_OPEN", "AFTER_HOURS", "CLOSED"].contains(&value));
}

#[tokio::test]
async fn search_matches_catalog_offline() {
    let app = build_test_router();

    let (status, body) = get(&app, "/api/v1/market/search?q=tcs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["symbol"] == "TCS"));

    let (_, body) = get(&app, "/api/v1/market/search?q=zzzz-no-match").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/api/v1/market/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn clearing_cache_returns_no_content() {
    let app = build_test_router();
    get(&app, "/api/v1/market/indices").await;
    let (status, _) = send(&app, Method::DELETE, "/api/v1/market/cache").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
