// Analyzer module: indicators, pattern detectors and the orchestrator that composes them.

pub mod market_indicators;
pub mod big_moves;
pub mod trend_shift;
pub mod compression;
pub mod narrative;
pub mod price_analysis;
pub mod cache;

// Re-export the main Analyzer implementation for ease of use.
pub use cache::AnalysisCache;
pub use price_analysis::{Analyzer, AnalyzerImpl};
