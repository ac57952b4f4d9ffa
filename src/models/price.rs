use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Consecutive missing values bridged by forward fill (trading halts).
pub const MAX_FORWARD_FILL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adjusted_close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adjusted_close,
            volume,
        }
    }

    /// A bar whose OHLC and adjusted close all equal `price`.
    pub fn flat(date: NaiveDate, price: f64) -> Self {
        Self::new(date, price, price, price, price, price, 0.0)
    }
}

/// A provider row before normalisation; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: Option<NaiveDate>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adjusted_close: Option<f64>,
    pub volume: Option<f64>,
}

/// Daily bars for one ticker, strictly ascending by date with positive
/// adjusted closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Wrap already clean bars, rejecting anything that breaks the ordering
    /// or positivity invariants.
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, EngineError> {
        let ticker = ticker.into();
        for window in bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(EngineError::invalid_input(format!(
                    "{}: bars must be strictly ascending by date ({} follows {})",
                    ticker, window[1].date, window[0].date
                )));
            }
        }
        if let Some(bad) = bars
            .iter()
            .find(|bar| !(bar.adjusted_close.is_finite() && bar.adjusted_close > 0.0))
        {
            return Err(EngineError::invalid_input(format!(
                "{}: non-positive adjusted close on {}",
                ticker, bad.date
            )));
        }
        Ok(Self { ticker, bars })
    }

    /// Normalise raw provider rows.
    ///
    /// Rows are sorted by date and de-duplicated (the last row for a date
    /// wins). Missing prices are forward filled for at most
    /// [`MAX_FORWARD_FILL`] consecutive rows; rows still lacking a close or
    /// adjusted close, or with a non-positive adjusted close, are dropped.
    pub fn from_raw(ticker: impl Into<String>, raw: Vec<RawBar>) -> Self {
        let ticker = ticker.into();
        let mut dated: Vec<(NaiveDate, RawBar)> = raw
            .into_iter()
            .filter_map(|bar| bar.date.map(|date| (date, bar)))
            .collect();
        // stable: later duplicates stay after earlier ones
        dated.sort_by_key(|(date, _)| *date);

        let mut deduped: Vec<(NaiveDate, RawBar)> = Vec::with_capacity(dated.len());
        for (date, bar) in dated {
            match deduped.last_mut() {
                Some((last_date, last_bar)) if *last_date == date => *last_bar = bar,
                _ => deduped.push((date, bar)),
            }
        }

        let mut fill = ForwardFill::default();
        let bars = deduped
            .into_iter()
            .filter_map(|(date, bar)| {
                let close = fill.close.apply(bar.close);
                let adjusted_close = fill.adjusted_close.apply(bar.adjusted_close);
                let open = fill.open.apply(bar.open);
                let high = fill.high.apply(bar.high);
                let low = fill.low.apply(bar.low);

                let (close, adjusted_close) = (close?, adjusted_close?);
                let open = open.unwrap_or(close);
                let high = high.unwrap_or(close);
                let low = low.unwrap_or(close);
                if !(adjusted_close.is_finite() && adjusted_close > 0.0) {
                    return None;
                }
                Some(PriceBar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    adjusted_close,
                    volume: bar.volume.filter(|v| v.is_finite()).unwrap_or(0.0),
                })
            })
            .collect();

        Self { ticker, bars }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn adjusted_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.adjusted_close).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    /// First bar dated on or after `date`.
    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&PriceBar> {
        let idx = self.bars.partition_point(|bar| bar.date < date);
        self.bars.get(idx)
    }

    pub fn bar_on(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.bars
            .binary_search_by_key(&date, |bar| bar.date)
            .ok()
            .map(|idx| &self.bars[idx])
    }
}

#[derive(Default)]
struct ForwardFill {
    open: FillState,
    high: FillState,
    low: FillState,
    close: FillState,
    adjusted_close: FillState,
}

#[derive(Default)]
struct FillState {
    last: Option<f64>,
    gap: usize,
}

impl FillState {
    fn apply(&mut self, value: Option<f64>) -> Option<f64> {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.last = Some(v);
                self.gap = 0;
                Some(v)
            }
            None => {
                self.gap += 1;
                if self.gap <= MAX_FORWARD_FILL {
                    self.last
                } else {
                    None
                }
            }
        }
    }
}
