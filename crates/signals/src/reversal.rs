//! Reversal point detection.
//!
//! A reversal point is the lowest close inside a maximal run of days where the
//! close trades below its moving average. The scan is a pure function over the
//! working series (moving-average warm-up rows already dropped).

use reversal_core::{ReversalPoint, WorkingPoint};

/// Working points required before any run is trusted.
pub const MIN_WORKING_POINTS: usize = 5;

/// Inclusive index range of a below-average run in the working series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

/// Splits the working series into maximal runs where `close < ma`.
///
/// A run still open at the last index is closed there and reported, so a dip
/// that has not yet crossed back above its average still counts.
#[must_use]
pub fn segments(working: &[WorkingPoint]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open: Option<usize> = None;

    for (i, point) in working.iter().enumerate() {
        match (point.is_below_average(), open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                segments.push(Segment { start, end: i - 1 });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        segments.push(Segment {
            start,
            end: working.len() - 1,
        });
    }

    segments
}

/// Index of the lowest close in `segment`; the earliest index wins ties.
fn argmin_close(working: &[WorkingPoint], segment: Segment) -> usize {
    let mut best = segment.start;
    for i in segment.start + 1..=segment.end {
        if working[i].close < working[best].close {
            best = i;
        }
    }
    best
}

/// Finds reversal points in a working series.
#[derive(Debug, Clone, Copy)]
pub struct ReversalDetector {
    min_points: usize,
}

impl Default for ReversalDetector {
    fn default() -> Self {
        Self {
            min_points: MIN_WORKING_POINTS,
        }
    }
}

impl ReversalDetector {
    #[must_use]
    pub const fn new(min_points: usize) -> Self {
        Self { min_points }
    }

    /// Returns one reversal point per below-average run, in chronological order.
    ///
    /// Empty when the series is shorter than the configured minimum or never
    /// dips below its average.
    #[must_use]
    pub fn detect(&self, working: &[WorkingPoint]) -> Vec<ReversalPoint> {
        if working.is_empty() || working.len() < self.min_points {
            return Vec::new();
        }

        segments(working)
            .into_iter()
            .map(|segment| {
                let point = working[argmin_close(working, segment)];
                ReversalPoint {
                    date: point.date,
                    price: point.close,
                }
            })
            .collect()
    }
}

/// [`ReversalDetector::detect`] with the default minimum history.
#[must_use]
pub fn detect(working: &[WorkingPoint]) -> Vec<ReversalPoint> {
    ReversalDetector::default().detect(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::ma3_working_series;
    use chrono::{Duration, NaiveDate};
    use reversal_core::{PriceBar, PriceSeries};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(start() + Duration::days(i as i64), c));
        PriceSeries::from_bars("TEST", bars)
    }

    fn point(day: i64, close: f64, ma: f64) -> WorkingPoint {
        WorkingPoint {
            date: start() + Duration::days(day),
            close,
            ma,
        }
    }

    #[test]
    fn rising_series_has_no_reversals() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let working = ma3_working_series(&series(&closes));
        assert!(segments(&working).is_empty());
        assert!(detect(&working).is_empty());
    }

    #[test]
    fn flat_series_has_no_reversals() {
        let working = ma3_working_series(&series(&[25.5; 20]));
        assert!(segments(&working).is_empty());
        assert!(detect(&working).is_empty());
    }

    #[test]
    fn ten_day_scenario_finds_two_runs() {
        let closes = [10.0, 9.0, 8.0, 8.0, 9.0, 11.0, 12.0, 11.0, 10.0, 9.0];
        let working = ma3_working_series(&series(&closes));
        assert_eq!(working.len(), 8);

        let runs = segments(&working);
        assert_eq!(
            runs,
            vec![Segment { start: 0, end: 1 }, Segment { start: 5, end: 7 }]
        );

        let reversals = detect(&working);
        assert_eq!(reversals.len(), 2);
        // tie at 8.0 on raw days 2 and 3: earliest wins
        assert_eq!(reversals[0].date, start() + Duration::days(2));
        assert!((reversals[0].price - 8.0).abs() < f64::EPSILON);
        // open tail run bottoms on the last day
        assert_eq!(reversals[1].date, start() + Duration::days(9));
        assert!((reversals[1].price - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_run_reports_its_minimum() {
        let working = vec![
            point(0, 10.0, 9.0),
            point(1, 8.0, 9.0),
            point(2, 7.0, 9.0),
            point(3, 7.5, 9.0),
            point(4, 10.0, 9.0),
            point(5, 11.0, 9.0),
        ];
        let reversals = detect(&working);
        assert_eq!(reversals.len(), 1);
        assert_eq!(reversals[0].date, start() + Duration::days(2));
        assert!((reversals[0].price - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_minimum_resolves_to_earliest_index() {
        let working = vec![
            point(0, 10.0, 9.0),
            point(1, 7.0, 9.0),
            point(2, 7.0, 9.0),
            point(3, 7.0, 9.0),
            point(4, 10.0, 9.0),
        ];
        let reversals = detect(&working);
        assert_eq!(reversals.len(), 1);
        assert_eq!(reversals[0].date, start() + Duration::days(1));
    }

    #[test]
    fn single_day_dip_is_its_own_reversal() {
        let working = vec![
            point(0, 10.0, 9.0),
            point(1, 10.0, 9.0),
            point(2, 8.5, 9.0),
            point(3, 10.0, 9.0),
            point(4, 10.0, 9.0),
        ];
        assert_eq!(segments(&working), vec![Segment { start: 2, end: 2 }]);
        let reversals = detect(&working);
        assert_eq!(
            reversals,
            vec![ReversalPoint {
                date: start() + Duration::days(2),
                price: 8.5
            }]
        );
    }

    #[test]
    fn close_equal_to_average_ends_a_run() {
        let working = vec![
            point(0, 8.0, 9.0),
            point(1, 9.0, 9.0),
            point(2, 8.0, 9.0),
            point(3, 9.5, 9.0),
            point(4, 9.5, 9.0),
        ];
        assert_eq!(
            segments(&working),
            vec![Segment { start: 0, end: 0 }, Segment { start: 2, end: 2 }]
        );
    }

    #[test]
    fn fewer_than_five_points_is_empty() {
        let working = vec![
            point(0, 8.0, 9.0),
            point(1, 7.0, 9.0),
            point(2, 8.0, 9.0),
            point(3, 8.0, 9.0),
        ];
        assert!(detect(&working).is_empty());
        assert!(ReversalDetector::new(4).detect(&working).len() == 1);
    }

    #[test]
    fn detect_is_idempotent() {
        let closes = [20.0, 19.0, 18.5, 19.5, 21.0, 20.0, 18.0, 17.5, 19.0, 22.0, 21.0];
        let working = ma3_working_series(&series(&closes));
        let first = detect(&working);
        let second = detect(&working);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
