//! Hypothetical portfolio backtesting.

pub mod simulator;

pub use simulator::PortfolioSimulator;
