//! Market data provider interface.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::models::price::PriceSeries;

/// How much history to request, in calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lookback {
    pub months: u32,
}

impl Lookback {
    pub fn months(months: u32) -> Self {
        Self { months }
    }

    /// Calendar days covered, rounded up generously for month lengths.
    pub fn calendar_days(&self) -> i64 {
        i64::from(self.months) * 31
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no price data found for {0}")]
    NotFound(String),

    #[error("rate limited while fetching {0}")]
    RateLimited(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily price history for `ticker` covering at least `lookback`.
    async fn fetch(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError>;
}

/// Serves fixed series from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<String, PriceSeries>,
    rate_limited: HashSet<String>,
    unavailable: HashSet<String>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker().to_string(), series);
    }

    /// Make every fetch of `ticker` fail with [`FetchError::RateLimited`].
    pub fn with_rate_limited(mut self, ticker: impl Into<String>) -> Self {
        self.rate_limited.insert(ticker.into());
        self
    }

    /// Make every fetch of `ticker` fail with [`FetchError::Unavailable`].
    pub fn with_unavailable(mut self, ticker: impl Into<String>) -> Self {
        self.unavailable.insert(ticker.into());
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn fetch(&self, ticker: &str, _lookback: Lookback) -> Result<PriceSeries, FetchError> {
        if self.rate_limited.contains(ticker) {
            return Err(FetchError::RateLimited(ticker.to_string()));
        }
        if self.unavailable.contains(ticker) {
            return Err(FetchError::Unavailable(format!("{} is not being served", ticker)));
        }
        self.series
            .get(ticker)
            .filter(|series| !series.is_empty())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(ticker.to_string()))
    }
}
