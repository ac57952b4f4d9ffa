//! Orchestrates indicators, gates and ranking over a ticker set.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::common::math;
use crate::config::ScreenerConfig;
use crate::error::EngineError;
use crate::indicators::IndicatorCalculator;
use crate::models::price::PriceSeries;
use crate::models::screening::{
    ExcludedTicker, GateFailureCounts, RankedStock, ScreeningResult, ScreeningSummary,
};
use crate::screening::gates::GateEvaluator;
use crate::screening::ranking::Ranker;
use crate::services::market_data::{FetchError, Lookback, MarketDataProvider};

pub struct ScreeningPipeline {
    config: ScreenerConfig,
    calculator: IndicatorCalculator,
    gates: GateEvaluator,
}

impl ScreeningPipeline {
    pub fn new(config: ScreenerConfig) -> Self {
        Self {
            calculator: IndicatorCalculator::new(config.return_formula),
            gates: GateEvaluator::new(config.thresholds),
            config,
        }
    }

    /// Fetch every ticker (at most `concurrency` requests in flight) and
    /// screen the results.
    ///
    /// Duplicate tickers are screened once, at their first position. A ticker
    /// the provider cannot serve is excluded with a reason; a rate-limit
    /// response aborts the run.
    pub async fn run(
        &self,
        provider: &dyn MarketDataProvider,
        tickers: &[String],
        top_n: usize,
    ) -> Result<ScreeningResult, EngineError> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = tickers
            .iter()
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();
        let lookback = Lookback::months(self.config.history_months);

        info!(
            tickers = unique.len(),
            top_n = top_n,
            return_formula = %self.config.return_formula,
            concurrency = self.config.concurrency,
            "starting screening run"
        );

        let fetched: Vec<(String, Result<PriceSeries, FetchError>)> = stream::iter(unique)
            .map(|ticker| async move {
                let result = provider.fetch(&ticker, lookback).await;
                (ticker, result)
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        self.evaluate(fetched, top_n)
    }

    /// Screen already fetched series, in the given order.
    ///
    /// Repeated tickers are screened once, at their first position. When no
    /// ticker produced a series and the provider reported itself unavailable,
    /// the run fails with [`EngineError::UpstreamUnavailable`].
    pub fn evaluate(
        &self,
        inputs: Vec<(String, Result<PriceSeries, FetchError>)>,
        top_n: usize,
    ) -> Result<ScreeningResult, EngineError> {
        let mut seen = HashSet::new();
        let inputs: Vec<_> = inputs
            .into_iter()
            .filter(|(ticker, _)| seen.insert(ticker.clone()))
            .collect();

        let total_tickers = inputs.len();
        let mut series = Vec::with_capacity(inputs.len());
        let mut excluded = Vec::new();
        let mut last_unavailable = None;

        for (ticker, result) in inputs {
            match result {
                Ok(s) if s.is_empty() => excluded.push(ExcludedTicker {
                    reason: format!("no price data found for {}", ticker),
                    ticker,
                }),
                Ok(s) => series.push(s),
                Err(FetchError::RateLimited(_)) => {
                    warn!(ticker = %ticker, "market data provider rate limited the run");
                    return Err(EngineError::UpstreamRateLimited(ticker));
                }
                Err(e) => {
                    warn!(ticker = %ticker, reason = %e, "excluding ticker");
                    if let FetchError::Unavailable(detail) = &e {
                        last_unavailable = Some(detail.clone());
                    }
                    excluded.push(ExcludedTicker {
                        ticker,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if series.is_empty() {
            if let Some(detail) = last_unavailable {
                return Err(EngineError::UpstreamUnavailable(detail));
            }
        }

        let mut result = self.screen_series(&series, top_n);
        result.summary.total_tickers = total_tickers;
        result.summary.excluded = excluded.len();
        result.excluded = excluded;
        Ok(result)
    }

    /// Screen in-memory series. Never fails: gate failures and an empty pass
    /// set are ordinary outcomes. A repeated ticker keeps its first series.
    pub fn screen_series(&self, series: &[PriceSeries], top_n: usize) -> ScreeningResult {
        let mut seen = HashSet::new();
        let mut all_results: Vec<RankedStock> = series
            .iter()
            .filter(|s| seen.insert(s.ticker()))
            .map(|s| {
                let indicators = self.calculator.compute(s);
                let gates = self.gates.evaluate(&indicators);
                RankedStock::unranked(indicators, gates)
            })
            .collect();

        let ranked = Ranker::rank(all_results.clone());

        // copy ranks back onto the input-ordered records; tickers are unique here
        let ranks: HashMap<&str, &RankedStock> =
            ranked.iter().map(|r| (r.ticker.as_str(), r)).collect();
        for stock in all_results.iter_mut().filter(|s| s.passed()) {
            if let Some(r) = ranks.get(stock.ticker.as_str()) {
                stock.rank_6m = r.rank_6m;
                stock.rank_12m = r.rank_12m;
                stock.final_rank = r.final_rank;
            }
        }

        let rejected: Vec<RankedStock> = all_results
            .iter()
            .filter(|s| !s.passed())
            .cloned()
            .collect();

        let mut gate_failures = GateFailureCounts::default();
        for stock in &rejected {
            gate_failures.record(&stock.gates);
        }

        let passed = ranked.len();
        let total_analyzed = all_results.len();
        let pass_rate = if total_analyzed == 0 {
            0.0
        } else {
            math::round_to(passed as f64 / total_analyzed as f64 * 100.0, 1)
        };

        let top_stocks: Vec<RankedStock> = ranked.into_iter().take(top_n).collect();

        info!(
            analyzed = total_analyzed,
            passed = passed,
            rejected = rejected.len(),
            selected = top_stocks.len(),
            pass_rate = pass_rate,
            "screening complete"
        );
        if !rejected.is_empty() {
            info!(
                trend = gate_failures.trend,
                proximity = gate_failures.proximity,
                consistency = gate_failures.consistency,
                performance = gate_failures.performance,
                "gate failure breakdown"
            );
        }

        ScreeningResult {
            top_stocks,
            summary: ScreeningSummary {
                total_tickers: total_analyzed,
                total_analyzed,
                passed_filters: passed,
                rejected: rejected.len(),
                excluded: 0,
                pass_rate,
                gate_failures,
            },
            all_results,
            rejected,
            excluded: Vec::new(),
            return_formula: self.config.return_formula,
            timestamp: Utc::now(),
        }
    }
}

impl Default for ScreeningPipeline {
    fn default() -> Self {
        Self::new(ScreenerConfig::default())
    }
}
