//! Derives the full indicator set for one ticker.

use tracing::debug;

use crate::config::{ReturnFormula, MIN_TRADING_DAYS_REQUIRED};
use crate::indicators::momentum::{period_return, price_months_ago, twelve_month_return, up_days_pct_6m};
use crate::indicators::structure::calculate_high_52w;
use crate::indicators::trend::{calculate_ema, EMA_FAST_PERIOD, EMA_SLOW_PERIOD};
use crate::models::indicators::IndicatorSet;
use crate::models::price::PriceSeries;

#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorCalculator {
    return_formula: ReturnFormula,
}

impl IndicatorCalculator {
    pub fn new(return_formula: ReturnFormula) -> Self {
        Self { return_formula }
    }

    /// Compute every indicator; the ones the history cannot support stay `None`.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorSet {
        let bars = series.bars();
        let mut set = IndicatorSet::empty(series.ticker(), self.return_formula);

        set.trading_days = bars.len();
        set.data_sufficient = bars.len() >= MIN_TRADING_DAYS_REQUIRED;
        set.current_price = series.latest().map(|bar| bar.adjusted_close);

        set.ema100 = calculate_ema(bars, EMA_FAST_PERIOD);
        set.ema200 = calculate_ema(bars, EMA_SLOW_PERIOD);
        set.high_52w = calculate_high_52w(bars);
        set.up_days_pct_6m = up_days_pct_6m(bars);

        set.price_6m_ago = price_months_ago(bars, 6);
        set.price_9m_ago = price_months_ago(bars, 9);
        set.price_12m_ago = price_months_ago(bars, 12);
        set.return_6m = period_return(bars, 6);
        set.return_9m = period_return(bars, 9);
        set.return_12m_standard = twelve_month_return(bars, ReturnFormula::Standard);
        set.return_12m_legacy = twelve_month_return(bars, ReturnFormula::Legacy);

        debug!(
            ticker = %set.ticker,
            trading_days = set.trading_days,
            data_sufficient = set.data_sufficient,
            "indicators computed"
        );

        set
    }
}
