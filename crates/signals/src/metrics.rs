//! Per-symbol metric bundle derived from the most recent reversal point.

use crate::reversal::MIN_WORKING_POINTS;
use crate::rounding::{percent_change, round_dp};
use reversal_core::{MetricBundle, ReversalPoint, WorkingPoint};

/// Trailing horizons reported in every bundle, in trading days.
pub const TRAILING_HORIZONS: [usize; 4] = [1, 3, 5, 20];

/// Builds [`MetricBundle`]s from a working series and its reversal points.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Computes the bundle for `symbol`.
    ///
    /// Returns `None` when there is no reversal point or the working series
    /// is shorter than the detector's minimum history.
    #[must_use]
    pub fn compute(
        symbol: &str,
        working: &[WorkingPoint],
        reversals: &[ReversalPoint],
        oscillator: Option<f64>,
    ) -> Option<MetricBundle> {
        if working.len() < MIN_WORKING_POINTS {
            return None;
        }
        let last_reversal = reversals.last()?;
        let current = working.last()?;

        let days_since_reversal = (current.date - last_reversal.date).num_days().max(0);
        let gain_since_reversal = percent_change(last_reversal.price, current.close);

        let [gain_1d, gain_3d, gain_5d, gain_20d] =
            TRAILING_HORIZONS.map(|h| trailing_gain(working, h));

        Some(MetricBundle {
            symbol: symbol.to_string(),
            days_since_reversal,
            gain_since_reversal,
            gain_1d,
            gain_3d,
            gain_5d,
            gain_20d,
            oscillator: oscillator.and_then(|v| round_dp(v.clamp(0.0, 100.0), 1)),
        })
    }
}

/// Percent change over the last `horizon` points of the working series.
///
/// `0.0` when the series is not longer than `horizon` or the past close is zero.
#[must_use]
pub fn trailing_gain(working: &[WorkingPoint], horizon: usize) -> f64 {
    if working.len() <= horizon {
        return 0.0;
    }
    let current = working[working.len() - 1].close;
    let past = working[working.len() - 1 - horizon].close;
    percent_change(past, current).unwrap_or(0.0)
}
