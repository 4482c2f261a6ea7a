//! Shared analysis path for ranking and charting.
//!
//! Both views run the same moving-average filter and detector so they can
//! never disagree on where reversal points fall.

use crate::indicators::{latest_rsi, ma3_working_series, RSI_PERIOD};
use crate::metrics::MetricsCalculator;
use crate::reversal::ReversalDetector;
use reversal_core::{MetricBundle, PriceSeries, ReversalPoint, WorkingPoint};

/// Everything derived from one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAnalysis {
    pub working: Vec<WorkingPoint>,
    pub reversals: Vec<ReversalPoint>,
    /// Oscillator at the most recent raw close.
    pub oscillator: Option<f64>,
}

impl SeriesAnalysis {
    #[must_use]
    pub fn new(series: &PriceSeries) -> Self {
        let working = ma3_working_series(series);
        let reversals = ReversalDetector::default().detect(&working);
        let oscillator = latest_rsi(&series.closes(), RSI_PERIOD);

        Self {
            working,
            reversals,
            oscillator,
        }
    }

    #[must_use]
    pub fn last_reversal(&self) -> Option<&ReversalPoint> {
        self.reversals.last()
    }

    /// Ranking row for `symbol`, or `None` when there is no actionable signal.
    #[must_use]
    pub fn metrics(&self, symbol: &str) -> Option<MetricBundle> {
        MetricsCalculator::compute(symbol, &self.working, &self.reversals, self.oscillator)
    }
}

/// Runs the full single-symbol pipeline and returns its ranking row.
#[must_use]
pub fn evaluate_series(series: &PriceSeries) -> Option<MetricBundle> {
    SeriesAnalysis::new(series).metrics(series.symbol())
}
