use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReturnFormula;
use crate::models::indicators::IndicatorSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub gate_a_trend: bool,
    pub gate_b_proximity: bool,
    pub gate_c_consistency: bool,
    pub gate_d_performance: bool,
    pub overall_pass: bool,
    /// One entry per failed gate, in gate order A to D.
    pub rejection_reasons: Vec<String>,
}

impl GateResult {
    pub fn failed_gates(&self) -> usize {
        [
            self.gate_a_trend,
            self.gate_b_proximity,
            self.gate_c_consistency,
            self.gate_d_performance,
        ]
        .iter()
        .filter(|passed| !**passed)
        .count()
    }
}

/// One screened ticker. Rank fields are set only for stocks that passed
/// every gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStock {
    pub ticker: String,
    pub indicators: IndicatorSet,
    pub gates: GateResult,
    pub rank_6m: Option<u32>,
    pub rank_12m: Option<u32>,
    pub final_rank: Option<u32>,
}

impl RankedStock {
    pub fn unranked(indicators: IndicatorSet, gates: GateResult) -> Self {
        Self {
            ticker: indicators.ticker.clone(),
            indicators,
            gates,
            rank_6m: None,
            rank_12m: None,
            final_rank: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.gates.overall_pass
    }
}

/// A ticker dropped before indicator computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedTicker {
    pub ticker: String,
    pub reason: String,
}

/// How many rejected stocks failed each gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateFailureCounts {
    pub trend: usize,
    pub proximity: usize,
    pub consistency: usize,
    pub performance: usize,
}

impl GateFailureCounts {
    pub fn record(&mut self, gates: &GateResult) {
        self.trend += usize::from(!gates.gate_a_trend);
        self.proximity += usize::from(!gates.gate_b_proximity);
        self.consistency += usize::from(!gates.gate_c_consistency);
        self.performance += usize::from(!gates.gate_d_performance);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    /// Tickers requested, including excluded ones.
    pub total_tickers: usize,
    /// Tickers whose price history was evaluated.
    pub total_analyzed: usize,
    pub passed_filters: usize,
    pub rejected: usize,
    pub excluded: usize,
    /// `passed / total_analyzed * 100`, one decimal.
    pub pass_rate: f64,
    pub gate_failures: GateFailureCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub top_stocks: Vec<RankedStock>,
    /// Every evaluated ticker in input order.
    pub all_results: Vec<RankedStock>,
    pub rejected: Vec<RankedStock>,
    pub excluded: Vec<ExcludedTicker>,
    pub summary: ScreeningSummary,
    pub return_formula: ReturnFormula,
    pub timestamp: DateTime<Utc>,
}
