//! Momentum screening and equal-weight portfolio simulation engine.
//!
//! Raw daily price history flows through indicator computation, the four
//! pass/fail gates and the dual-horizon ranker. The portfolio simulator is an
//! independent consumer of the same price series.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod portfolio;
pub mod screening;
pub mod services;

pub use config::{Config, GateThresholds, ReturnFormula, ScreenerConfig};
pub use error::EngineError;
pub use indicators::IndicatorCalculator;
pub use portfolio::PortfolioSimulator;
pub use screening::{GateEvaluator, Ranker, ScreeningPipeline};
