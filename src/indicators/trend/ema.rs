//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::price::PriceBar;

pub const EMA_FAST_PERIOD: usize = 100;
pub const EMA_SLOW_PERIOD: usize = 200;

/// EMA of adjusted closes for a specific period.
///
/// Returns `None` when fewer than `period` bars are available.
pub fn calculate_ema(bars: &[PriceBar], period: usize) -> Option<f64> {
    if bars.len() < period {
        return None;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.adjusted_close).collect();
    math::ema(&closes, period)
}
