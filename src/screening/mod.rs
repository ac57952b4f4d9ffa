//! Gate evaluation, ranking and the screening pipeline.

pub mod gates;
pub mod pipeline;
pub mod ranking;

pub use gates::GateEvaluator;
pub use pipeline::ScreeningPipeline;
pub use ranking::Ranker;
