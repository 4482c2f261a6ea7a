use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, half away from zero.
///
/// Goes through `Decimal` so the result matches what a person would write
/// down, independent of the binary float representation. `None` for
/// non-finite input.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    Decimal::from_f64(value)?
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// Percent change from `from` to `to`, rounded to 2 decimals.
///
/// `None` when `from` is zero or the result is not finite.
#[must_use]
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    round_dp((to - from) / from * 100.0, 2)
}
