//! Engine error taxonomy.
//!
//! Business outcomes (gate failures, an empty pass set, insufficient history)
//! are never errors. Only invalid caller input and upstream conditions that
//! must reach the caller are represented here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown index '{0}'")]
    UnknownIndex(String),

    #[error("market data provider rate limited the request for {0}")]
    UpstreamRateLimited(String),

    #[error("market data provider unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl EngineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
