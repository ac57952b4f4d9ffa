//! Share of up days over the trailing six months.

use crate::config::TRADING_DAYS_6M;
use crate::models::price::PriceBar;

/// Percentage of day-over-day close increases within the trailing
/// `window` bars (or the whole series when shorter).
///
/// Needs at least two bars in the window to form one comparison.
pub fn up_days_pct(bars: &[PriceBar], window: usize) -> Option<f64> {
    let start = bars.len().saturating_sub(window);
    let recent = &bars[start..];
    if recent.len() < 2 {
        return None;
    }

    let comparisons = recent.len() - 1;
    let up_days = recent
        .windows(2)
        .filter(|pair| pair[1].close > pair[0].close)
        .count();

    Some(up_days as f64 / comparisons as f64 * 100.0)
}

pub fn up_days_pct_6m(bars: &[PriceBar]) -> Option<f64> {
    up_days_pct(bars, TRADING_DAYS_6M)
}
