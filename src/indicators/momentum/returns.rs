//! Multi-horizon price returns anchored a whole number of months back.

use crate::common::math;
use crate::config::{ReturnFormula, TRADING_DAYS_PER_MONTH};
use crate::models::price::PriceBar;

/// How far short of the target offset a series may fall and still use its
/// first bar as the anchor.
pub const ANCHOR_TOLERANCE_DAYS: usize = 5;

/// Index of the bar `offset` trading days before the latest bar.
pub fn anchor_index(len: usize, offset: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    if last >= offset {
        Some(last - offset)
    } else if offset - last <= ANCHOR_TOLERANCE_DAYS {
        Some(0)
    } else {
        None
    }
}

/// Adjusted close `months` months (21 trading days each) before the latest bar.
pub fn price_months_ago(bars: &[PriceBar], months: usize) -> Option<f64> {
    let idx = anchor_index(bars.len(), months * TRADING_DAYS_PER_MONTH)?;
    Some(bars[idx].adjusted_close)
}

/// Percentage return over `months` months.
pub fn period_return(bars: &[PriceBar], months: usize) -> Option<f64> {
    let now = bars.last()?.adjusted_close;
    let then = price_months_ago(bars, months)?;
    math::percent_return(now, then)
}

/// Twelve-month return under the given formula.
pub fn twelve_month_return(bars: &[PriceBar], formula: ReturnFormula) -> Option<f64> {
    let now = bars.last()?.adjusted_close;
    let then = price_months_ago(bars, 12)?;
    match formula {
        ReturnFormula::Standard => math::percent_return(now, then),
        ReturnFormula::Legacy => math::legacy_return(now, then),
    }
}
