use crate::error::EvaluationError;
use reversal_core::{MetricBundle, PriceProvider};
use reversal_signals::SeriesAnalysis;

/// Fetches one symbol and runs the single-symbol pipeline over it.
///
/// `Ok(None)` means the history was usable but holds no reversal signal.
///
/// # Errors
/// Returns an error if the provider fails or returns fewer than
/// `min_observations` daily closes.
pub async fn evaluate_symbol(
    provider: &dyn PriceProvider,
    symbol: &str,
    lookback_days: u32,
    min_observations: usize,
) -> Result<Option<MetricBundle>, EvaluationError> {
    let series = provider.fetch(symbol, lookback_days).await?;

    if series.len() < min_observations {
        return Err(EvaluationError::InsufficientHistory {
            observations: series.len(),
            required: min_observations,
        });
    }

    Ok(SeriesAnalysis::new(&series).metrics(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{trending_with_dip, FixtureProvider};
    use reversal_core::ProviderError;

    #[tokio::test]
    async fn short_history_is_rejected() {
        let provider = FixtureProvider::new().with_closes("NEW", &[10.0; 12]);
        let err = evaluate_symbol(&provider, "NEW", 60, 20).await.unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InsufficientHistory {
                observations: 12,
                required: 20
            }
        ));
    }

    #[tokio::test]
    async fn provider_not_found_propagates() {
        let provider = FixtureProvider::new();
        let err = evaluate_symbol(&provider, "GONE", 60, 20).await.unwrap_err();
        assert!(matches!(err, EvaluationError::Provider(ProviderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn dip_produces_bundle_for_requested_symbol() {
        let provider = FixtureProvider::new().with_closes("DIP", &trending_with_dip(30, 24));
        let bundle = evaluate_symbol(&provider, "DIP", 60, 20).await.unwrap().unwrap();
        assert_eq!(bundle.symbol, "DIP");
        assert_eq!(bundle.days_since_reversal, 5);
    }

    #[tokio::test]
    async fn steady_uptrend_has_no_signal() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + f64::from(i)).collect();
        let provider = FixtureProvider::new().with_closes("UP", &closes);
        assert!(evaluate_symbol(&provider, "UP", 60, 20).await.unwrap().is_none());
    }
}
