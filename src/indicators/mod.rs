//! Technical indicators over daily price bars

pub mod calculator;

pub mod momentum;
pub mod structure;
pub mod trend;

pub use calculator::IndicatorCalculator;
