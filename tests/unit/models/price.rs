//! Unit tests for PriceSeries construction and normalisation

use momentix::error::EngineError;
use momentix::models::price::{PriceBar, PriceSeries, RawBar};

use crate::fixtures::{date, series_from_prices};

fn raw(day: usize, price: Option<f64>) -> RawBar {
    RawBar {
        date: Some(date(day)),
        open: price,
        high: price,
        low: price,
        close: price,
        adjusted_close: price,
        volume: Some(1_000.0),
    }
}

#[test]
fn test_new_rejects_unordered_bars() {
    let bars = vec![PriceBar::flat(date(1), 10.0), PriceBar::flat(date(0), 11.0)];
    let err = PriceSeries::new("AAA", bars).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn test_new_rejects_duplicate_dates() {
    let bars = vec![PriceBar::flat(date(0), 10.0), PriceBar::flat(date(0), 11.0)];
    assert!(PriceSeries::new("AAA", bars).is_err());
}

#[test]
fn test_new_rejects_non_positive_adjusted_close() {
    let bars = vec![PriceBar::flat(date(0), 10.0), PriceBar::flat(date(1), 0.0)];
    assert!(PriceSeries::new("AAA", bars).is_err());
}

#[test]
fn test_from_raw_sorts_and_keeps_last_duplicate() {
    let rows = vec![raw(2, Some(12.0)), raw(0, Some(10.0)), raw(2, Some(13.0)), raw(1, Some(11.0))];
    let series = PriceSeries::from_raw("AAA", rows);

    assert_eq!(series.len(), 3);
    assert_eq!(series.dates(), vec![date(0), date(1), date(2)]);
    assert_eq!(series.adjusted_closes(), vec![10.0, 11.0, 13.0]);
}

#[test]
fn test_from_raw_forward_fills_short_gaps() {
    let rows = vec![raw(0, Some(10.0)), raw(1, None), raw(2, None), raw(3, Some(12.0))];
    let series = PriceSeries::from_raw("AAA", rows);

    assert_eq!(series.len(), 4);
    assert_eq!(series.closes(), vec![10.0, 10.0, 10.0, 12.0]);
}

#[test]
fn test_from_raw_drops_rows_beyond_fill_limit() {
    let rows = vec![
        raw(0, Some(10.0)),
        raw(1, None),
        raw(2, None),
        raw(3, None),
        raw(4, Some(12.0)),
    ];
    let series = PriceSeries::from_raw("AAA", rows);

    assert_eq!(series.dates(), vec![date(0), date(1), date(2), date(4)]);
}

#[test]
fn test_from_raw_drops_leading_gaps_and_bad_prices() {
    let rows = vec![raw(0, None), raw(1, Some(-1.0)), raw(2, Some(10.0))];
    let series = PriceSeries::from_raw("AAA", rows);

    assert_eq!(series.dates(), vec![date(2)]);
}

#[test]
fn test_from_raw_defaults_missing_volume_and_ohlc() {
    let row = RawBar {
        date: Some(date(0)),
        close: Some(10.0),
        adjusted_close: Some(9.5),
        ..RawBar::default()
    };
    let series = PriceSeries::from_raw("AAA", vec![row]);
    let bar = series.latest().unwrap();

    assert_eq!(bar.volume, 0.0);
    assert_eq!(bar.open, 10.0);
    assert_eq!(bar.adjusted_close, 9.5);
}

#[test]
fn test_from_raw_skips_undated_rows() {
    let rows = vec![RawBar { date: None, ..raw(0, Some(10.0)) }, raw(1, Some(11.0))];
    assert_eq!(PriceSeries::from_raw("AAA", rows).len(), 1);
}

#[test]
fn test_date_lookups() {
    let series = series_from_prices("AAA", &[10.0, 11.0, 12.0]);

    assert_eq!(series.bar_on(date(1)).map(|b| b.close), Some(11.0));
    assert!(series.bar_on(date(7)).is_none());
    assert_eq!(series.first_on_or_after(date(1)).map(|b| b.date), Some(date(1)));
    assert!(series.first_on_or_after(date(3)).is_none());
    assert_eq!(series.ticker(), "AAA");
}
