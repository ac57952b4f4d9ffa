use serde::{Deserialize, Serialize};

use crate::config::ReturnFormula;

/// Per-ticker derived values. Every numeric field is `None` when the series
/// was too short to compute it; nothing defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ticker: String,
    pub current_price: Option<f64>,
    pub ema100: Option<f64>,
    pub ema200: Option<f64>,
    pub high_52w: Option<f64>,
    pub up_days_pct_6m: Option<f64>,
    pub return_6m: Option<f64>,
    pub return_9m: Option<f64>,
    pub return_12m_standard: Option<f64>,
    pub return_12m_legacy: Option<f64>,
    pub price_6m_ago: Option<f64>,
    pub price_9m_ago: Option<f64>,
    pub price_12m_ago: Option<f64>,
    pub trading_days: usize,
    pub data_sufficient: bool,
    pub return_formula: ReturnFormula,
}

impl IndicatorSet {
    /// An indicator set with nothing computed.
    pub fn empty(ticker: impl Into<String>, return_formula: ReturnFormula) -> Self {
        Self {
            ticker: ticker.into(),
            current_price: None,
            ema100: None,
            ema200: None,
            high_52w: None,
            up_days_pct_6m: None,
            return_6m: None,
            return_9m: None,
            return_12m_standard: None,
            return_12m_legacy: None,
            price_6m_ago: None,
            price_9m_ago: None,
            price_12m_ago: None,
            trading_days: 0,
            data_sufficient: false,
            return_formula,
        }
    }

    /// The 12-month return chosen by `return_formula`.
    pub fn selected_return_12m(&self) -> Option<f64> {
        match self.return_formula {
            ReturnFormula::Standard => self.return_12m_standard,
            ReturnFormula::Legacy => self.return_12m_legacy,
        }
    }
}
