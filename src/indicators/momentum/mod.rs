//! Momentum indicators: period returns, up-day ratio

pub mod returns;
pub mod up_days;

pub use returns::*;
pub use up_days::*;
