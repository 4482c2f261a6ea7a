//! Relative-strength momentum oscillator (RSI with simple averages).
//!
//! Gains and losses are averaged with a plain trailing mean over `period`
//! deltas rather than Wilder smoothing.

/// Period used by the reversal scan.
pub const RSI_PERIOD: usize = 14;

/// Computes the oscillator for every position of `closes`.
///
/// The value at index `i` needs `period` day-over-day deltas, so it is `None`
/// for `i < period`. A window with no losses saturates at 100; a window with
/// neither gains nor losses (flat price) is `None`.
#[must_use]
pub fn relative_strength_index(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    for (i, slot) in out.iter_mut().enumerate().skip(period) {
        // deltas[j] is the move into closes[j + 1]
        let window = &deltas[i - period..i];
        *slot = oscillator_value(window, period);
    }

    out
}

/// Oscillator value at the most recent close, if defined.
#[must_use]
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    relative_strength_index(closes, period).last().copied().flatten()
}

fn oscillator_value(deltas: &[f64], period: usize) -> Option<f64> {
    let (gain_sum, loss_sum) = deltas.iter().fold((0.0, 0.0), |(g, l), &d| {
        if d > 0.0 {
            (g + d, l)
        } else {
            (g, l - d)
        }
    });

    #[allow(clippy::cast_precision_loss)]
    let period = period as f64;
    let mean_gain = gain_sum / period;
    let mean_loss = loss_sum / period;

    if mean_loss <= 0.0 {
        return if mean_gain > 0.0 { Some(100.0) } else { None };
    }

    let rs = mean_gain / mean_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_until_period_deltas_exist() {
        let closes: Vec<f64> = (0..15).map(f64::from).collect();
        let rsi = relative_strength_index(&closes, 14);
        assert!(rsi[..14].iter().all(Option::is_none));
        assert!(rsi[14].is_some());

        let short: Vec<f64> = (0..14).map(f64::from).collect();
        assert_eq!(latest_rsi(&short, 14), None);
    }

    #[test]
    fn only_gains_saturates_at_100() {
        let closes: Vec<f64> = (0..20).map(|i| 50.0 + f64::from(i)).collect();
        assert_eq!(latest_rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn only_losses_reads_zero() {
        let closes: Vec<f64> = (0..20).map(|i| 80.0 - f64::from(i)).collect();
        assert_eq!(latest_rsi(&closes, 14), Some(0.0));
    }

    #[test]
    fn flat_series_is_undefined() {
        let closes = vec![42.0; 30];
        assert_eq!(latest_rsi(&closes, 14), None);
    }

    #[test]
    fn balanced_moves_read_fifty() {
        // alternating +1 / -1 over an even window
        let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        let value = latest_rsi(&closes, 14).unwrap();
        assert!((value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn known_ratio() {
        // 3 units of gain, 1 unit of loss over a 4-period window: rs = 3, rsi = 75
        let closes = vec![10.0, 11.0, 12.0, 11.0, 12.0];
        let value = latest_rsi(&closes, 4).unwrap();
        assert!((value - 75.0).abs() < 1e-9);
    }

    #[test]
    fn always_within_bounds() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (f64::from(i) * 0.7).sin() * 15.0 + f64::from(i % 7))
            .collect();
        for value in relative_strength_index(&closes, 14).into_iter().flatten() {
            assert!(value.is_finite());
            assert!((0.0..=100.0).contains(&value));
        }
    }
}
