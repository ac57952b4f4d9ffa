//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod portfolio;
pub mod price;
pub mod screening;

pub use indicators::IndicatorSet;
pub use portfolio::{SimulationResult, StockPerformance, TimelinePoint};
pub use price::{PriceBar, PriceSeries, RawBar};
pub use screening::{
    ExcludedTicker, GateFailureCounts, GateResult, RankedStock, ScreeningResult,
    ScreeningSummary,
};
