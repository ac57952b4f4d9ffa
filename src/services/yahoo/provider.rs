//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;
use tracing::{debug, warn};

use super::messages::{ChartResponse, ChartResult};
use crate::config::MarketDataConfig;
use crate::models::price::{PriceSeries, RawBar};
use crate::services::market_data::{FetchError, Lookback, MarketDataProvider};

const CHART_ENDPOINT: &str = "/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; momentix/0.1)";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(config: &MarketDataConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        }
    }

    async fn fetch_once(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError> {
        let now = Utc::now();
        let from = now - ChronoDuration::days(lookback.calendar_days());
        let url = format!("{}{}/{}", self.base_url, CHART_ENDPOINT, ticker);

        debug!(url = %url, ticker = ticker, "fetching daily chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", from.timestamp().to_string()),
                ("period2", now.timestamp().to_string()),
                ("interval", "1d".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Unavailable(format!("request timeout for {}", ticker))
                } else {
                    FetchError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(ticker.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited(ticker.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Unavailable(format!("HTTP {}: {}", status, body)));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(format!("{}: {}", ticker, e)))?;

        if let Some(err) = body.chart.error {
            if err.code.eq_ignore_ascii_case("not found") {
                return Err(FetchError::NotFound(ticker.to_string()));
            }
            return Err(FetchError::Unavailable(format!(
                "{}: {}",
                err.code,
                err.description.unwrap_or_default()
            )));
        }

        let result = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FetchError::NotFound(ticker.to_string()))?;

        let series = PriceSeries::from_raw(ticker, parse_bars(&result));
        if series.is_empty() {
            return Err(FetchError::NotFound(ticker.to_string()));
        }
        Ok(series)
    }
}

/// Turn the column-oriented chart payload into raw rows.
fn parse_bars(result: &ChartResult) -> Vec<RawBar> {
    let offset = result.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.first().cloned().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .first()
        .map(|a| a.adjclose.clone())
        .unwrap_or_default();

    result
        .timestamp
        .iter()
        .enumerate()
        .map(|(idx, &ts)| {
            let close = column(&quote.close, idx);
            RawBar {
                date: DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()),
                open: column(&quote.open, idx),
                high: column(&quote.high, idx),
                low: column(&quote.low, idx),
                close,
                // unadjusted series report no adjclose column
                adjusted_close: if adjclose.is_empty() {
                    close
                } else {
                    column(&adjclose, idx)
                },
                volume: column(&quote.volume, idx),
            }
        })
        .collect()
}

fn column(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError> {
        (|| async { self.fetch_once(ticker, lookback).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(|e| matches!(e, FetchError::Unavailable(_)))
            .notify(|e, delay| {
                warn!(ticker = ticker, error = %e, delay_ms = delay.as_millis() as u64, "retrying market data fetch");
            })
            .await
    }
}

impl Default for YahooMarketDataProvider {
    fn default() -> Self {
        Self::new(&MarketDataConfig::default())
    }
}
