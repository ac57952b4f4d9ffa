//! Unit tests for EMA indicator

use momentix::indicators::trend::{calculate_ema, EMA_FAST_PERIOD, EMA_SLOW_PERIOD};

use crate::fixtures::{bars_from_prices, compounding_prices, constant_prices};

#[test]
fn test_ema_insufficient_data() {
    let bars = bars_from_prices(&constant_prices(100.0, 199));
    assert!(calculate_ema(&bars, EMA_SLOW_PERIOD).is_none());
    assert!(calculate_ema(&bars, EMA_FAST_PERIOD).is_some());
}

#[test]
fn test_ema_constant_series() {
    let bars = bars_from_prices(&constant_prices(100.0, 300));
    assert_eq!(calculate_ema(&bars, EMA_FAST_PERIOD), Some(100.0));
    assert_eq!(calculate_ema(&bars, EMA_SLOW_PERIOD), Some(100.0));
}

#[test]
fn test_fast_ema_leads_in_uptrend() {
    let prices = compounding_prices(50.0, 0.002, 300);
    let bars = bars_from_prices(&prices);
    let fast = calculate_ema(&bars, EMA_FAST_PERIOD).unwrap();
    let slow = calculate_ema(&bars, EMA_SLOW_PERIOD).unwrap();

    assert!(prices[299] > fast);
    assert!(fast > slow);
}
