use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome for one ticker of an equal-weight backtest. When `error` is set
/// the ticker was left out of the portfolio totals and the numeric fields
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPerformance {
    pub ticker: String,
    pub buy_date: Option<NaiveDate>,
    pub buy_price: Option<f64>,
    pub current_date: Option<NaiveDate>,
    pub current_price: Option<f64>,
    pub shares_bought: Option<f64>,
    pub invested: Option<f64>,
    pub current_value: Option<f64>,
    pub profit_loss: Option<f64>,
    pub return_pct: Option<f64>,
    pub error: Option<String>,
}

impl StockPerformance {
    pub fn failed(ticker: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            buy_date: None,
            buy_price: None,
            current_date: None,
            current_price: None,
            shares_bought: None,
            invested: None,
            current_value: None,
            profit_loss: None,
            return_pct: None,
            error: Some(error.into()),
        }
    }

    pub fn is_included(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub investment_amount: f64,
    pub period_months: u32,
    pub per_stock_amount: f64,
    pub total_invested: f64,
    pub current_value: f64,
    pub total_profit_loss: f64,
    pub total_return_pct: f64,
    pub stocks: Vec<StockPerformance>,
    pub portfolio_timeline: Vec<TimelinePoint>,
}
