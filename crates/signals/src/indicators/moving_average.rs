//! Trailing simple moving average.

use reversal_core::{AveragedPoint, PriceSeries, WorkingPoint};

/// Window used by the reversal scan.
pub const MA_WINDOW: usize = 3;

/// Computes a trailing simple moving average.
///
/// The output has the same length as `closes`; positions with fewer than
/// `window` observations (including the current one) are `None`. A window of
/// identical closes averages to exactly that close, so a flat series never
/// reads as trading below its own average.
#[must_use]
pub fn simple_moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; closes.len()];
    }

    (0..closes.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &closes[i + 1 - window..=i];
            let first = slice[0];
            if slice.iter().all(|&c| c == first) {
                return Some(first);
            }
            #[allow(clippy::cast_precision_loss)]
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// Pairs every bar of `series` with its trailing average.
#[must_use]
pub fn averaged_series(series: &PriceSeries, window: usize) -> Vec<AveragedPoint> {
    let averages = simple_moving_average(&series.closes(), window);

    series
        .bars()
        .iter()
        .zip(averages)
        .map(|(bar, ma)| AveragedPoint {
            date: bar.date,
            close: bar.close,
            ma,
        })
        .collect()
}

/// Drops the warm-up rows whose average is undefined.
#[must_use]
pub fn working_series(averaged: &[AveragedPoint]) -> Vec<WorkingPoint> {
    averaged
        .iter()
        .filter_map(|p| {
            p.ma.map(|ma| WorkingPoint {
                date: p.date,
                close: p.close,
                ma,
            })
        })
        .collect()
}

/// Working series for the reversal scan: MA3 over `series`, warm-up dropped.
#[must_use]
pub fn ma3_working_series(series: &PriceSeries) -> Vec<WorkingPoint> {
    working_series(&averaged_series(series, MA_WINDOW))
}
