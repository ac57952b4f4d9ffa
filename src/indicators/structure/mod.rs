//! Price-structure indicators: 52-week high

pub mod high_52w;

pub use high_52w::*;
