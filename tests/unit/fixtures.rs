//! Synthetic price series shared by the unit tests

use chrono::{Duration, NaiveDate};
use momentix::config::ReturnFormula;
use momentix::models::indicators::IndicatorSet;
use momentix::models::price::{PriceBar, PriceSeries};
use momentix::models::screening::{GateResult, RankedStock};

pub fn date(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap() + Duration::days(offset as i64)
}

pub fn bars_from_prices(prices: &[f64]) -> Vec<PriceBar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PriceBar::flat(date(i), price))
        .collect()
}

pub fn series_from_prices(ticker: &str, prices: &[f64]) -> PriceSeries {
    PriceSeries::new(ticker, bars_from_prices(prices)).unwrap()
}

pub fn constant_prices(price: f64, count: usize) -> Vec<f64> {
    vec![price; count]
}

/// `count` prices growing by `daily_growth` per bar from `start`.
pub fn compounding_prices(start: f64, daily_growth: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| start * (1.0 + daily_growth).powi(i as i32))
        .collect()
}

/// `count` prices moving in a straight line from `start` to `end`.
pub fn linear_prices(start: f64, end: f64, count: usize) -> Vec<f64> {
    let steps = (count - 1) as f64;
    (0..count)
        .map(|i| start + (end - start) * i as f64 / steps)
        .collect()
}

/// A ranked-stock candidate that passed every gate.
pub fn passing_stock(ticker: &str, return_6m: f64, return_12m: f64) -> RankedStock {
    let mut indicators = IndicatorSet::empty(ticker, ReturnFormula::Standard);
    indicators.return_6m = Some(return_6m);
    indicators.return_12m_standard = Some(return_12m);
    RankedStock::unranked(indicators, gates(true))
}

pub fn failing_stock(ticker: &str, return_6m: f64, return_12m: f64) -> RankedStock {
    let mut stock = passing_stock(ticker, return_6m, return_12m);
    stock.gates = gates(false);
    stock
}

fn gates(pass: bool) -> GateResult {
    GateResult {
        gate_a_trend: pass,
        gate_b_proximity: true,
        gate_c_consistency: true,
        gate_d_performance: true,
        overall_pass: pass,
        rejection_reasons: if pass {
            Vec::new()
        } else {
            vec!["failed trend alignment".to_string()]
        },
    }
}
