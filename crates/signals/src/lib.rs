//! MA3 reversal point detection and per-symbol metrics.
//!
//! This crate provides:
//! - Moving average and momentum oscillator indicators
//! - The reversal detector (below-average runs and their minima)
//! - The metric bundle used for ranking
//! - The chart projection used for visualization

pub mod analysis;
pub mod chart;
pub mod indicators;
pub mod metrics;
pub mod reversal;
pub mod rounding;

pub use analysis::{evaluate_series, SeriesAnalysis};
pub use chart::ChartProjector;
pub use indicators::{latest_rsi, ma3_working_series, relative_strength_index, simple_moving_average};
pub use metrics::{trailing_gain, MetricsCalculator, TRAILING_HORIZONS};
pub use reversal::{detect, segments, ReversalDetector, Segment, MIN_WORKING_POINTS};
pub use rounding::{percent_change, round_dp};
