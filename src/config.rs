//! Runtime configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::EngineError;

pub const TRADING_DAYS_PER_MONTH: usize = 21;
pub const TRADING_DAYS_6M: usize = 126;
pub const TRADING_DAYS_12M: usize = 252;
/// Bars required before a series is reported as fully sufficient.
pub const MIN_TRADING_DAYS_REQUIRED: usize = 300;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_HISTORY_MONTHS: u32 = 24;
const DEFAULT_TOP_N: usize = 20;
const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_MARKET_DATA_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MARKET_DATA_MAX_RETRIES: usize = 3;

/// Deployment environment name (`ENVIRONMENT`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|value| value.trim().to_lowercase())
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

/// Which 12-month return feeds Gate D and the 12-month rank.
///
/// `Legacy` computes `price_now / (price_then - 1) * 100`, which is not a
/// percentage return. It is kept only for compatibility with historical
/// screens and must be selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormula {
    #[default]
    Standard,
    Legacy,
}

impl ReturnFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnFormula::Standard => "standard",
            ReturnFormula::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ReturnFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnFormula {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ReturnFormula::Standard),
            "legacy" => Ok(ReturnFormula::Legacy),
            other => Err(EngineError::invalid_input(format!(
                "unknown return formula '{}', expected 'standard' or 'legacy'",
                other
            ))),
        }
    }
}

/// Pass thresholds for the four screening gates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    /// Gate B: minimum price as a fraction of the 52-week high.
    pub proximity_to_high: f64,
    /// Gate C: up-day percentage must be strictly greater than this.
    pub min_up_days_pct: f64,
    /// Gate D: minimum selected 12-month return.
    pub min_return_12m: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            proximity_to_high: 0.75,
            min_up_days_pct: 40.0,
            min_return_12m: 6.5,
        }
    }
}

/// Parameters of a single screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    pub return_formula: ReturnFormula,
    pub thresholds: GateThresholds,
    pub top_n: usize,
    /// Maximum number of concurrent market-data fetches.
    pub concurrency: usize,
    pub history_months: u32,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            return_formula: ReturnFormula::default(),
            thresholds: GateThresholds::default(),
            top_n: DEFAULT_TOP_N,
            concurrency: DEFAULT_CONCURRENCY,
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}

impl ScreenerConfig {
    pub fn with_return_formula(mut self, return_formula: ReturnFormula) -> Self {
        self.return_formula = return_formula;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Market-data HTTP client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_MARKET_DATA_TIMEOUT_SECS),
            max_retries: DEFAULT_MARKET_DATA_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub screener: ScreenerConfig,
    pub market_data: MarketDataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            screener: ScreenerConfig::default(),
            market_data: MarketDataConfig::default(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults; an
    /// unknown `SCREENER_RETURN_FORMULA` is rejected so the legacy formula is
    /// never selected by accident.
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Config::default();

        let return_formula = match env::var("SCREENER_RETURN_FORMULA") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => ReturnFormula::default(),
        };

        let screener = ScreenerConfig {
            return_formula,
            thresholds: GateThresholds::default(),
            top_n: parse_var("SCREENER_TOP_N").unwrap_or(defaults.screener.top_n),
            concurrency: parse_var::<usize>("SCREENER_CONCURRENCY")
                .unwrap_or(defaults.screener.concurrency)
                .max(1),
            history_months: parse_var("SCREENER_HISTORY_MONTHS")
                .unwrap_or(defaults.screener.history_months),
        };

        let market_data = MarketDataConfig {
            base_url: env::var("MARKET_DATA_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.market_data.base_url),
            timeout: parse_var("MARKET_DATA_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.market_data.timeout),
            max_retries: parse_var("MARKET_DATA_MAX_RETRIES")
                .unwrap_or(defaults.market_data.max_retries),
        };

        Ok(Self {
            environment: get_environment(),
            port: parse_var("PORT").unwrap_or(defaults.port),
            screener,
            market_data,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}
