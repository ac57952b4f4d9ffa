//! Unit tests for the up-day ratio

use momentix::indicators::momentum::{up_days_pct, up_days_pct_6m};

use crate::fixtures::{bars_from_prices, constant_prices, linear_prices};

#[test]
fn test_needs_two_bars() {
    assert!(up_days_pct_6m(&bars_from_prices(&[10.0])).is_none());
    assert_eq!(up_days_pct_6m(&bars_from_prices(&[10.0, 11.0])), Some(100.0));
}

#[test]
fn test_flat_series_has_no_up_days() {
    let bars = bars_from_prices(&constant_prices(50.0, 300));
    assert_eq!(up_days_pct_6m(&bars), Some(0.0));
}

#[test]
fn test_alternating_series() {
    // up, down, up, down
    let bars = bars_from_prices(&[10.0, 11.0, 10.0, 11.0, 10.0]);
    assert_eq!(up_days_pct(&bars, 126), Some(50.0));
}

#[test]
fn test_only_trailing_window_counts() {
    let mut prices = linear_prices(100.0, 50.0, 200);
    prices.extend(linear_prices(51.0, 80.0, 126));
    let bars = bars_from_prices(&prices);

    assert_eq!(up_days_pct_6m(&bars), Some(100.0));
}
