//! Unit tests for configuration defaults and parsing

use momentix::config::{Config, GateThresholds, ReturnFormula, ScreenerConfig};
use momentix::error::EngineError;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.screener.top_n, 20);
    assert_eq!(config.screener.concurrency, 4);
    assert_eq!(config.screener.return_formula, ReturnFormula::Standard);
    assert_eq!(config.market_data.max_retries, 3);

    let thresholds = GateThresholds::default();
    assert_eq!(thresholds.proximity_to_high, 0.75);
    assert_eq!(thresholds.min_up_days_pct, 40.0);
    assert_eq!(thresholds.min_return_12m, 6.5);
}

#[test]
fn test_return_formula_parsing() {
    assert_eq!("standard".parse::<ReturnFormula>().unwrap(), ReturnFormula::Standard);
    assert_eq!(" Legacy ".parse::<ReturnFormula>().unwrap(), ReturnFormula::Legacy);
    assert!(matches!(
        "fancy".parse::<ReturnFormula>(),
        Err(EngineError::InvalidInput(_))
    ));
    assert_eq!(ReturnFormula::Legacy.to_string(), "legacy");
}

#[test]
fn test_return_formula_serde() {
    let json = serde_json::to_string(&ReturnFormula::Legacy).unwrap();
    assert_eq!(json, "\"legacy\"");
    let parsed: ReturnFormula = serde_json::from_str("\"standard\"").unwrap();
    assert_eq!(parsed, ReturnFormula::Standard);
}

#[test]
fn test_concurrency_is_at_least_one() {
    let config = ScreenerConfig::default().with_concurrency(0).with_top_n(5);
    assert_eq!(config.concurrency, 1);
    assert_eq!(config.top_n, 5);
}
