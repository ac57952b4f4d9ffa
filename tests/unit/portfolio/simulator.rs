//! Unit tests for the equal-weight portfolio simulator

use momentix::error::EngineError;
use momentix::models::price::PriceSeries;
use momentix::portfolio::PortfolioSimulator;
use momentix::services::{FetchError, InMemoryMarketDataProvider};

use crate::fixtures::{constant_prices, date, series_from_prices};

/// 50 until bar 36, then a straight line to 100 at bar 99.
fn doubling_prices() -> Vec<f64> {
    (0..100)
        .map(|i| {
            if i <= 36 {
                50.0
            } else {
                50.0 + 50.0 * (i - 36) as f64 / 63.0
            }
        })
        .collect()
}

fn flat() -> PriceSeries {
    series_from_prices("FLAT", &constant_prices(20.0, 100))
}

fn doubler() -> PriceSeries {
    series_from_prices("DBL", &doubling_prices())
}

fn ok(series: PriceSeries) -> (String, Result<PriceSeries, FetchError>) {
    (series.ticker().to_string(), Ok(series))
}

#[test]
fn test_flat_and_doubling_returns_fifty_percent() {
    let result = PortfolioSimulator::new()
        .simulate_series(vec![ok(flat()), ok(doubler())], 100_000.0, 3)
        .unwrap();

    assert_eq!(result.per_stock_amount, 50_000.0);
    assert!((result.total_invested - 100_000.0).abs() < 1e-6);
    assert!((result.current_value - 150_000.0).abs() < 1e-6);
    assert!((result.total_return_pct - 50.0).abs() < 0.01);

    let dbl = &result.stocks[1];
    assert_eq!(dbl.buy_date, Some(date(36)));
    assert_eq!(dbl.buy_price, Some(50.0));
    assert_eq!(dbl.shares_bought, Some(1_000.0));
    assert!((dbl.return_pct.unwrap() - 100.0).abs() < 0.01);

    let flat = &result.stocks[0];
    assert_eq!(flat.return_pct, Some(0.0));
    assert_eq!(flat.current_date, Some(date(99)));
}

#[test]
fn test_timeline_spans_window() {
    let result = PortfolioSimulator::new()
        .simulate_series(vec![ok(flat()), ok(doubler())], 100_000.0, 3)
        .unwrap();
    let timeline = &result.portfolio_timeline;

    assert_eq!(timeline.len(), 64);
    assert_eq!(timeline[0].date, date(36));
    assert!((timeline[0].value - 100_000.0).abs() < 1e-6);
    assert!((timeline[63].value - result.current_value).abs() < 1e-6);
    assert!(timeline.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_invalid_period() {
    let simulator = PortfolioSimulator::new();
    for months in [0, 7] {
        let err = simulator
            .simulate_series(vec![ok(flat())], 1_000.0, months)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}

#[test]
fn test_invalid_amount_and_tickers() {
    let simulator = PortfolioSimulator::new();
    for amount in [0.0, -10.0, f64::NAN] {
        assert!(simulator.simulate_series(vec![ok(flat())], amount, 3).is_err());
    }
    assert!(simulator.simulate_series(Vec::new(), 1_000.0, 3).is_err());
}

#[test]
fn test_missing_ticker_reported_not_counted() {
    let inputs = vec![
        ok(doubler()),
        ("GONE".to_string(), Err(FetchError::NotFound("GONE".to_string()))),
    ];
    let result = PortfolioSimulator::new()
        .simulate_series(inputs, 10_000.0, 3)
        .unwrap();

    assert_eq!(result.per_stock_amount, 5_000.0);
    assert_eq!(result.total_invested, 5_000.0);
    assert_eq!(result.stocks.len(), 2);
    let gone = &result.stocks[1];
    assert!(gone.error.is_some());
    assert!(gone.current_value.is_none());
    assert!((result.total_return_pct - 100.0).abs() < 0.01);
}

#[test]
fn test_delisted_ticker_is_excluded() {
    let delisted = series_from_prices("OLD", &constant_prices(30.0, 90));
    let result = PortfolioSimulator::new()
        .simulate_series(vec![ok(flat()), ok(delisted)], 10_000.0, 2)
        .unwrap();

    let old = &result.stocks[1];
    assert!(old.error.as_deref().unwrap().contains("delisted"));
    assert_eq!(result.total_invested, 5_000.0);
}

#[test]
fn test_all_failed_gives_zero_return() {
    let inputs = vec![("GONE".to_string(), Err(FetchError::NotFound("GONE".to_string())))];
    let result = PortfolioSimulator::new()
        .simulate_series(inputs, 10_000.0, 1)
        .unwrap();

    assert_eq!(result.total_invested, 0.0);
    assert_eq!(result.total_return_pct, 0.0);
    assert!(result.portfolio_timeline.is_empty());
}

#[test]
fn test_rate_limit_is_propagated() {
    let inputs = vec![
        ok(flat()),
        ("HOT".to_string(), Err(FetchError::RateLimited("HOT".to_string()))),
    ];
    let err = PortfolioSimulator::new()
        .simulate_series(inputs, 10_000.0, 1)
        .unwrap_err();
    assert_eq!(err, EngineError::UpstreamRateLimited("HOT".to_string()));
}

#[tokio::test]
async fn test_simulate_fetches_from_provider() {
    let provider = InMemoryMarketDataProvider::new()
        .with_series(flat())
        .with_series(doubler());
    let tickers = vec!["FLAT".to_string(), "DBL".to_string()];

    let result = PortfolioSimulator::new()
        .with_concurrency(1)
        .simulate(&provider, &tickers, 100_000.0, 3)
        .await
        .unwrap();

    assert_eq!(result.period_months, 3);
    assert!((result.total_return_pct - 50.0).abs() < 0.01);
}

#[tokio::test]
async fn test_simulate_validates_before_fetching() {
    let provider = InMemoryMarketDataProvider::new().with_rate_limited("FLAT");
    let err = PortfolioSimulator::new()
        .simulate(&provider, &["FLAT".to_string()], 1_000.0, 9)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn test_provider_down_is_an_error() {
    let inputs = vec![
        ("AAA".to_string(), Err(FetchError::Unavailable("HTTP 503".to_string()))),
        ("BBB".to_string(), Err(FetchError::NotFound("BBB".to_string()))),
    ];
    let err = PortfolioSimulator::new()
        .simulate_series(inputs, 10_000.0, 3)
        .unwrap_err();
    assert_eq!(err, EngineError::UpstreamUnavailable("HTTP 503".to_string()));
}

#[test]
fn test_partial_outage_is_reported_per_ticker() {
    let inputs = vec![
        ok(flat()),
        ("AAA".to_string(), Err(FetchError::Unavailable("HTTP 503".to_string()))),
    ];
    let result = PortfolioSimulator::new()
        .simulate_series(inputs, 10_000.0, 3)
        .unwrap();
    assert!(result.stocks[1].error.is_some());
    assert_eq!(result.total_invested, 5_000.0);
}
