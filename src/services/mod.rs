//! External collaborators: market data and index constituents.

pub mod index_registry;
pub mod market_data;
pub mod yahoo;

pub use index_registry::{IndexInfo, IndexRegistry, Market, StaticIndexRegistry};
pub use market_data::{FetchError, InMemoryMarketDataProvider, Lookback, MarketDataProvider};
pub use yahoo::YahooMarketDataProvider;
