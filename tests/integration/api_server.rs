//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, screening and simulation.


use momentix::services::InMemoryMarketDataProvider;
use serde_json::{json, Value};

use test_utils::{compounding, series, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "momentix-screener");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(app.metrics.http_requests_total.get() >= 1);
}

#[tokio::test]
async fn indices_endpoint_lists_registry() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/indices").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let indices = body.as_array().expect("array of indices");
    assert_eq!(indices.len(), 22);
    assert!(indices
        .iter()
        .any(|i| i["key"] == "magnificent_7" && i["stock_count"] == 7 && i["market"] == "us"));
}

#[tokio::test]
async fn tickers_endpoint_returns_constituents() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/tickers/nifty_it").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["index"], "nifty_it");
    assert_eq!(body["count"], 10);
    assert!(body["tickers"][0].as_str().unwrap().ends_with(".NS"));
}

#[tokio::test]
async fn tickers_endpoint_rejects_unknown_index() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/tickers/ftse_100").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("ftse_100"));
}

#[tokio::test]
async fn screen_endpoint_ranks_index() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/screen")
        .json(&json!({ "index_name": "magnificent_7", "top_n": 2 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["index_name"], "magnificent_7");
    assert_eq!(body["return_formula"], "standard");

    let top = body["top_stocks"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["ticker"], "NVDA");
    assert_eq!(top[0]["final_rank"], 2);
    assert_eq!(top[1]["ticker"], "AAPL");

    let summary = &body["summary"];
    assert_eq!(summary["total_tickers"], 7);
    assert_eq!(summary["total_analyzed"], 5);
    assert_eq!(summary["passed_filters"], 3);
    assert_eq!(summary["rejected"], 2);
    assert_eq!(summary["excluded"], 2);
    assert_eq!(summary["pass_rate"], 60.0);

    let excluded: Vec<&str> = body["excluded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["ticker"].as_str().unwrap())
        .collect();
    assert_eq!(excluded, vec!["META", "TSLA"]);

    // ranks of rejected stocks stay null rather than zero
    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert!(rejected.iter().all(|r| r["final_rank"].is_null()));
    assert_eq!(app.metrics.screening_runs_total.get(), 1);
}

#[tokio::test]
async fn screen_endpoint_accepts_legacy_formula() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/screen")
        .json(&json!({ "index_name": "magnificent_7", "return_formula": "legacy" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["return_formula"], "legacy");
    assert_eq!(body["all_results"][0]["indicators"]["return_formula"], "legacy");
}

#[tokio::test]
async fn screen_endpoint_validates_top_n() {
    let app = TestApiServer::new().await;
    for top_n in [0, 101] {
        let response = app
            .server
            .post("/screen")
            .json(&json!({ "index_name": "magnificent_7", "top_n": top_n }))
            .await;
        assert_eq!(response.status_code(), 400);
    }
}

#[tokio::test]
async fn screen_endpoint_surfaces_rate_limits() {
    let provider = InMemoryMarketDataProvider::new()
        .with_series(series("MSFT", compounding(300.0, 0.0015, 320)))
        .with_rate_limited("AAPL");
    let app = TestApiServer::with_provider(provider).await;

    let response = app
        .server
        .post("/screen")
        .json(&json!({ "index_name": "magnificent_7" }))
        .await;
    assert_eq!(response.status_code(), 429);
}

#[tokio::test]
async fn simulate_endpoint_reports_each_ticker() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/simulate")
        .json(&json!({
            "tickers": ["GOOGL", "META"],
            "investment_amount": 10000.0,
            "period_months": 3
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["per_stock_amount"], 5000.0);
    assert_eq!(body["total_invested"], 5000.0);
    assert_eq!(body["total_return_pct"], 0.0);

    let stocks = body["stocks"].as_array().unwrap();
    assert_eq!(stocks.len(), 2);
    assert!(stocks[0]["error"].is_null());
    assert!(stocks[1]["error"].is_string());
    assert!(stocks[1]["current_value"].is_null());
    assert!(!body["portfolio_timeline"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn simulate_endpoint_rejects_invalid_period() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/simulate")
        .json(&json!({
            "tickers": ["AAPL"],
            "investment_amount": 10000.0,
            "period_months": 7
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn screen_endpoint_reports_provider_outage() {
    let provider = ["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA"]
        .into_iter()
        .fold(InMemoryMarketDataProvider::new(), |p, t| p.with_unavailable(t));
    let app = TestApiServer::with_provider(provider).await;

    let response = app
        .server
        .post("/screen")
        .json(&json!({ "index_name": "magnificent_7" }))
        .await;
    assert_eq!(response.status_code(), 502);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn simulate_endpoint_reports_provider_outage() {
    let provider = InMemoryMarketDataProvider::new().with_unavailable("AAPL");
    let app = TestApiServer::with_provider(provider).await;

    let response = app
        .server
        .post("/simulate")
        .json(&json!({
            "tickers": ["AAPL"],
            "investment_amount": 1000.0,
            "period_months": 1
        }))
        .await;
    assert_eq!(response.status_code(), 502);
}
