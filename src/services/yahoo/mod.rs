//! Yahoo Finance daily chart provider

pub mod messages;
pub mod provider;

pub use provider::YahooMarketDataProvider;
