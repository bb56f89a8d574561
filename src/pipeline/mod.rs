//! The ranking computation pipeline
//!
//! Extraction → caching → window aggregation → opponent strength →
//! advanced-metric estimation → scoring → compilation. Each stage is pure
//! or explicitly injected state; the compiler owns orchestration and
//! failure isolation.

pub mod aggregate;
pub mod cache;
pub mod compiler;
pub mod extractor;
pub mod metrics;
pub mod scoring;
pub mod strength;

pub use cache::GameStatCache;
pub use compiler::{CompilerConfig, RankingCompiler};
pub use scoring::{SeasonContext, WeightTable};
pub use strength::OpponentStrength;
