//! 52-week high

use crate::common::math;
use crate::config::TRADING_DAYS_12M;
use crate::models::price::PriceBar;

/// Minimum history before a 52-week high is reported for a shorter series.
pub const MIN_DAYS_FOR_HIGH: usize = 200;

/// Highest adjusted close over the trailing 252 bars.
///
/// Series shorter than a year use all their bars, but only once they have
/// at least [`MIN_DAYS_FOR_HIGH`] of them; a fresh listing's high would
/// otherwise make Gate B trivially easy.
pub fn calculate_high_52w(bars: &[PriceBar]) -> Option<f64> {
    if bars.len() < MIN_DAYS_FOR_HIGH {
        return None;
    }

    let start = bars.len().saturating_sub(TRADING_DAYS_12M);
    let closes: Vec<f64> = bars[start..].iter().map(|b| b.adjusted_close).collect();
    math::max(&closes)
}
