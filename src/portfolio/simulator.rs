//! Equal-weight buy-and-hold backtest.
//!
//! The investment is split evenly across the requested tickers, each slice
//! buys fractional shares at the first bar on or after the window start, and
//! the holdings are marked to the latest adjusted close. No rebalancing.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::config::TRADING_DAYS_PER_MONTH;
use crate::error::EngineError;
use crate::models::portfolio::{SimulationResult, StockPerformance, TimelinePoint};
use crate::models::price::PriceSeries;
use crate::services::market_data::{FetchError, Lookback, MarketDataProvider};

pub const MIN_PERIOD_MONTHS: u32 = 1;
pub const MAX_PERIOD_MONTHS: u32 = 6;
/// A series ending more than this many trading days before the rest of the
/// portfolio is treated as delisted.
pub const STALE_TOLERANCE_DAYS: usize = 5;

const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct PortfolioSimulator {
    concurrency: usize,
}

impl Default for PortfolioSimulator {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

struct Holding<'a> {
    series: &'a PriceSeries,
    buy_date: NaiveDate,
    shares: f64,
}

impl PortfolioSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetch the tickers and run the backtest.
    pub async fn simulate(
        &self,
        provider: &dyn MarketDataProvider,
        tickers: &[String],
        investment_amount: f64,
        period_months: u32,
    ) -> Result<SimulationResult, EngineError> {
        Self::validate(tickers.len(), investment_amount, period_months)?;

        // one spare month so the window start is always covered
        let lookback = Lookback::months(period_months + 1);
        let fetched: Vec<(String, Result<PriceSeries, FetchError>)> =
            stream::iter(tickers.iter().cloned())
                .map(|ticker| async move {
                    let result = provider.fetch(&ticker, lookback).await;
                    (ticker, result)
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        self.simulate_series(fetched, investment_amount, period_months)
    }

    /// Run the backtest over already fetched series.
    ///
    /// Fails with [`EngineError::UpstreamUnavailable`] when no ticker produced
    /// a series and the provider reported itself unavailable.
    pub fn simulate_series(
        &self,
        inputs: Vec<(String, Result<PriceSeries, FetchError>)>,
        investment_amount: f64,
        period_months: u32,
    ) -> Result<SimulationResult, EngineError> {
        Self::validate(inputs.len(), investment_amount, period_months)?;

        let per_stock_amount = investment_amount / inputs.len() as f64;

        let rate_limited = inputs
            .iter()
            .any(|(_, result)| matches!(result, Err(FetchError::RateLimited(_))));
        if !rate_limited && inputs.iter().all(|(_, result)| result.is_err()) {
            let unavailable = inputs.iter().rev().find_map(|(_, result)| match result {
                Err(FetchError::Unavailable(detail)) => Some(detail.clone()),
                _ => None,
            });
            if let Some(detail) = unavailable {
                return Err(EngineError::UpstreamUnavailable(detail));
            }
        }

        let calendar: Vec<NaiveDate> = inputs
            .iter()
            .filter_map(|(_, result)| result.as_ref().ok())
            .flat_map(|series| series.bars().iter().map(|bar| bar.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let offset = period_months as usize * TRADING_DAYS_PER_MONTH;
        let window_start = calendar
            .len()
            .checked_sub(1)
            .map(|last| calendar[last.saturating_sub(offset)]);

        let mut stocks = Vec::with_capacity(inputs.len());
        let mut holdings = Vec::new();

        for (ticker, result) in &inputs {
            let series = match result {
                Ok(series) => series,
                Err(FetchError::RateLimited(_)) => {
                    return Err(EngineError::UpstreamRateLimited(ticker.clone()));
                }
                Err(e) => {
                    warn!(ticker = %ticker, reason = %e, "excluding ticker from simulation");
                    stocks.push(StockPerformance::failed(ticker, e.to_string()));
                    continue;
                }
            };

            match Self::open_position(series, &calendar, window_start, per_stock_amount) {
                Ok((performance, holding)) => {
                    stocks.push(performance);
                    holdings.push(holding);
                }
                Err(reason) => {
                    warn!(ticker = %ticker, reason = %reason, "excluding ticker from simulation");
                    stocks.push(StockPerformance::failed(ticker, reason));
                }
            }
        }

        let included = stocks.iter().filter(|s| s.is_included());
        let total_invested: f64 = included.clone().filter_map(|s| s.invested).sum();
        let current_value: f64 = included.filter_map(|s| s.current_value).sum();
        let total_profit_loss = current_value - total_invested;
        let total_return_pct = if total_invested > 0.0 {
            total_profit_loss / total_invested * 100.0
        } else {
            0.0
        };

        let portfolio_timeline = match window_start {
            Some(start) => Self::timeline(&calendar, start, &holdings),
            None => Vec::new(),
        };

        info!(
            tickers = stocks.len(),
            included = holdings.len(),
            period_months = period_months,
            total_return_pct = total_return_pct,
            "simulation complete"
        );

        Ok(SimulationResult {
            investment_amount,
            period_months,
            per_stock_amount,
            total_invested,
            current_value,
            total_profit_loss,
            total_return_pct,
            stocks,
            portfolio_timeline,
        })
    }

    fn validate(tickers: usize, investment_amount: f64, period_months: u32) -> Result<(), EngineError> {
        if !(MIN_PERIOD_MONTHS..=MAX_PERIOD_MONTHS).contains(&period_months) {
            return Err(EngineError::invalid_input(format!(
                "period_months must be between {} and {}, got {}",
                MIN_PERIOD_MONTHS, MAX_PERIOD_MONTHS, period_months
            )));
        }
        if !(investment_amount.is_finite() && investment_amount > 0.0) {
            return Err(EngineError::invalid_input(format!(
                "investment_amount must be positive, got {}",
                investment_amount
            )));
        }
        if tickers == 0 {
            return Err(EngineError::invalid_input("at least one ticker is required"));
        }
        Ok(())
    }

    fn open_position<'a>(
        series: &'a PriceSeries,
        calendar: &[NaiveDate],
        window_start: Option<NaiveDate>,
        amount: f64,
    ) -> Result<(StockPerformance, Holding<'a>), String> {
        let (start, latest) = match (window_start, series.latest()) {
            (Some(start), Some(latest)) => (start, latest),
            _ => return Err(format!("no price data found for {}", series.ticker())),
        };

        let end_idx = calendar.len() - 1;
        let latest_idx = calendar.partition_point(|d| *d < latest.date);
        if end_idx.saturating_sub(latest_idx) > STALE_TOLERANCE_DAYS {
            return Err(format!(
                "no price data after {}, treated as delisted",
                latest.date
            ));
        }

        let buy = series
            .first_on_or_after(start)
            .ok_or_else(|| format!("no price data on or after {}", start))?;

        let shares = amount / buy.adjusted_close;
        let current_value = shares * latest.adjusted_close;
        let profit_loss = current_value - amount;

        let performance = StockPerformance {
            ticker: series.ticker().to_string(),
            buy_date: Some(buy.date),
            buy_price: Some(buy.adjusted_close),
            current_date: Some(latest.date),
            current_price: Some(latest.adjusted_close),
            shares_bought: Some(shares),
            invested: Some(amount),
            current_value: Some(current_value),
            profit_loss: Some(profit_loss),
            return_pct: Some(profit_loss / amount * 100.0),
            error: None,
        };

        Ok((
            performance,
            Holding {
                series,
                buy_date: buy.date,
                shares,
            },
        ))
    }

    /// Portfolio value on each calendar date from `start`, summing the
    /// holdings that traded that day.
    fn timeline(calendar: &[NaiveDate], start: NaiveDate, holdings: &[Holding<'_>]) -> Vec<TimelinePoint> {
        calendar
            .iter()
            .filter(|date| **date >= start)
            .filter_map(|&date| {
                let values: Vec<f64> = holdings
                    .iter()
                    .filter(|h| date >= h.buy_date)
                    .filter_map(|h| h.series.bar_on(date).map(|bar| h.shares * bar.adjusted_close))
                    .collect();
                if values.is_empty() {
                    return None;
                }
                Some(TimelinePoint {
                    date,
                    value: values.iter().sum(),
                })
            })
            .collect()
    }
}
