//! Four-gate pass/fail evaluation.
//!
//! - A (trend): price >= EMA100 >= EMA200
//! - B (proximity): price >= 75% of the 52-week high
//! - C (consistency): more than 40% up days over six months
//! - D (performance): selected 12-month return >= 6.5
//!
//! A missing operand fails its gate.

use crate::config::GateThresholds;
use crate::models::indicators::IndicatorSet;
use crate::models::screening::GateResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct GateEvaluator {
    thresholds: GateThresholds,
}

impl GateEvaluator {
    pub fn new(thresholds: GateThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, ind: &IndicatorSet) -> GateResult {
        let mut reasons = Vec::new();

        let gate_a_trend = Self::record(self.trend_gate(ind), &mut reasons);
        let gate_b_proximity = Self::record(self.proximity_gate(ind), &mut reasons);
        let gate_c_consistency = Self::record(self.consistency_gate(ind), &mut reasons);
        let gate_d_performance = Self::record(self.performance_gate(ind), &mut reasons);

        GateResult {
            gate_a_trend,
            gate_b_proximity,
            gate_c_consistency,
            gate_d_performance,
            overall_pass: gate_a_trend && gate_b_proximity && gate_c_consistency && gate_d_performance,
            rejection_reasons: reasons,
        }
    }

    fn record(outcome: Result<(), String>, reasons: &mut Vec<String>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(reason) => {
                reasons.push(reason);
                false
            }
        }
    }

    fn trend_gate(&self, ind: &IndicatorSet) -> Result<(), String> {
        let price = ind.current_price.ok_or_else(|| insufficient("current price"))?;
        let ema100 = ind.ema100.ok_or_else(|| insufficient("EMA100"))?;
        let ema200 = ind.ema200.ok_or_else(|| insufficient("EMA200"))?;

        if price >= ema100 && ema100 >= ema200 {
            Ok(())
        } else {
            Err(format!(
                "failed trend alignment (price {:.2}, EMA100 {:.2}, EMA200 {:.2})",
                price, ema100, ema200
            ))
        }
    }

    fn proximity_gate(&self, ind: &IndicatorSet) -> Result<(), String> {
        let price = ind.current_price.ok_or_else(|| insufficient("current price"))?;
        let high = ind.high_52w.ok_or_else(|| insufficient("52-week high"))?;
        let floor = self.thresholds.proximity_to_high * high;

        if price >= floor {
            Ok(())
        } else {
            Err(format!(
                "failed proximity to high (price {:.2} < {:.0}% of 52-week high {:.2})",
                price,
                self.thresholds.proximity_to_high * 100.0,
                high
            ))
        }
    }

    fn consistency_gate(&self, ind: &IndicatorSet) -> Result<(), String> {
        let up_days = ind
            .up_days_pct_6m
            .ok_or_else(|| insufficient("6-month up-day ratio"))?;

        if up_days > self.thresholds.min_up_days_pct {
            Ok(())
        } else {
            Err(format!(
                "failed consistency (up days {:.1}% <= {:.1}%)",
                up_days, self.thresholds.min_up_days_pct
            ))
        }
    }

    fn performance_gate(&self, ind: &IndicatorSet) -> Result<(), String> {
        let ret = ind
            .selected_return_12m()
            .ok_or_else(|| insufficient("12-month return"))?;

        if ret >= self.thresholds.min_return_12m {
            Ok(())
        } else {
            Err(format!(
                "failed performance ({} 12-month return {:.2} < {:.2})",
                ind.return_formula, ret, self.thresholds.min_return_12m
            ))
        }
    }
}

fn insufficient(what: &str) -> String {
    format!("insufficient price history for {}", what)
}
