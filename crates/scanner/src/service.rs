use crate::aggregator::{Aggregator, ScanPolicy, ScanReport};
use crate::error::ServiceError;
use reversal_core::{
    normalize_symbol, ChartError, ChartSeries, MetricBundle, PriceProvider, StoreError, SymbolStore,
};
use reversal_signals::ChartProjector;
use std::sync::Arc;
use tracing::{info, warn};

/// Calendar days fetched when checking that a new symbol is real.
pub const VALIDATION_LOOKBACK_DAYS: u32 = 5;

/// Result of a universe edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolChange {
    pub symbol: String,
    /// Universe size after the edit.
    pub count: usize,
}

/// Entry point shared by the HTTP server and the CLI.
///
/// Owns the symbol store, the price provider, and the aggregator built on
/// top of that provider.
pub struct ReversalService {
    store: Arc<dyn SymbolStore>,
    provider: Arc<dyn PriceProvider>,
    aggregator: Aggregator,
}

impl ReversalService {
    #[must_use]
    pub fn new(store: Arc<dyn SymbolStore>, provider: Arc<dyn PriceProvider>, policy: ScanPolicy) -> Self {
        let aggregator = Aggregator::new(Arc::clone(&provider), policy);
        Self {
            store,
            provider,
            aggregator,
        }
    }

    #[must_use]
    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Tracked symbols in ascending order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn list_symbols(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.store.list().await?.into_iter().collect())
    }

    /// Normalizes `raw`, checks that the provider knows it, and adds it.
    ///
    /// # Errors
    /// Returns a validation error for an empty or malformed symbol,
    /// [`ServiceError::UnknownSymbol`] when the provider has no recent data,
    /// and a store error when it is already tracked or the store fails.
    pub async fn add_symbol(&self, raw: &str) -> Result<SymbolChange, ServiceError> {
        let symbol = normalize_symbol(raw)?;

        match self.provider.fetch(&symbol, VALIDATION_LOOKBACK_DAYS).await {
            Ok(series) if !series.is_empty() => {}
            Ok(_) => return Err(ServiceError::UnknownSymbol(symbol)),
            Err(e) => {
                warn!("Rejecting {symbol}: {e}");
                return Err(ServiceError::UnknownSymbol(symbol));
            }
        }

        let current = self.store.list().await?;
        if current.contains(&symbol) {
            return Err(StoreError::AlreadyExists(symbol).into());
        }

        self.store.add(&symbol).await?;
        info!("Added {symbol} to the universe");

        Ok(SymbolChange {
            symbol,
            count: current.len() + 1,
        })
    }

    /// # Errors
    /// Returns a validation error for an empty or malformed symbol and a
    /// store error when it is not tracked or the store fails.
    pub async fn remove_symbol(&self, raw: &str) -> Result<SymbolChange, ServiceError> {
        let symbol = normalize_symbol(raw)?;

        let current = self.store.list().await?;
        if !current.contains(&symbol) {
            return Err(StoreError::NotFound(symbol).into());
        }

        self.store.remove(&symbol).await?;
        info!("Removed {symbol} from the universe");

        Ok(SymbolChange {
            symbol,
            count: current.len().saturating_sub(1),
        })
    }

    /// Full scan of the tracked universe.
    ///
    /// # Errors
    /// Returns an error only if the universe cannot be listed. Per-symbol
    /// failures are reported inside the [`ScanReport`].
    pub async fn scan(&self) -> Result<ScanReport, ServiceError> {
        let universe = self.list_symbols().await?;
        Ok(self.aggregator.scan(&universe).await)
    }

    /// Ranked rows for the tracked universe.
    ///
    /// # Errors
    /// Returns an error only if the universe cannot be listed.
    pub async fn data(&self) -> Result<Vec<MetricBundle>, ServiceError> {
        Ok(self.scan().await?.results)
    }

    /// Chart view for any symbol, tracked or not.
    ///
    /// # Errors
    /// Returns [`ServiceError::NoData`] when the provider has no bars for the
    /// symbol, or the provider error for any other fetch failure.
    pub async fn chart(&self, raw: &str) -> Result<ChartSeries, ServiceError> {
        let symbol = normalize_symbol(raw)?;
        let lookback = self.aggregator.policy().lookback_days;

        let series = match self.provider.fetch(&symbol, lookback).await {
            Ok(series) => series,
            Err(e) if e.is_not_found() => return Err(ServiceError::NoData),
            Err(e) => return Err(e.into()),
        };

        ChartProjector::project(&series).map_err(|ChartError::NotFound| ServiceError::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{trending_with_dip, FixtureProvider};
    use async_trait::async_trait;
    use reversal_core::{ProviderError, ValidationError};
    use std::collections::BTreeSet;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct VecStore(Mutex<BTreeSet<String>>);

    impl VecStore {
        fn with(symbols: &[&str]) -> Self {
            Self(Mutex::new(symbols.iter().map(|s| (*s).to_string()).collect()))
        }
    }

    #[async_trait]
    impl SymbolStore for VecStore {
        async fn list(&self) -> Result<BTreeSet<String>, StoreError> {
            Ok(self.0.lock().await.clone())
        }

        async fn add(&self, symbol: &str) -> Result<(), StoreError> {
            self.0.lock().await.insert(symbol.to_string());
            Ok(())
        }

        async fn remove(&self, symbol: &str) -> Result<(), StoreError> {
            self.0.lock().await.remove(symbol);
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl SymbolStore for BrokenStore {
        async fn list(&self) -> Result<BTreeSet<String>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn add(&self, _symbol: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn remove(&self, _symbol: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    fn service(store: impl SymbolStore + 'static, provider: FixtureProvider) -> ReversalService {
        ReversalService::new(Arc::new(store), Arc::new(provider), ScanPolicy::default())
    }

    #[tokio::test]
    async fn add_normalizes_and_counts() {
        let provider = FixtureProvider::new().with_closes("NVDA", &[1.0, 2.0, 3.0]);
        let svc = service(VecStore::with(&["AAPL"]), provider);

        let change = svc.add_symbol("  nvda ").await.unwrap();

        assert_eq!(change.symbol, "NVDA");
        assert_eq!(change.count, 2);
        assert_eq!(svc.list_symbols().await.unwrap(), vec!["AAPL", "NVDA"]);
    }

    #[tokio::test]
    async fn add_rejects_empty_before_any_fetch() {
        let provider = Arc::new(FixtureProvider::new());
        let svc = ReversalService::new(
            Arc::new(VecStore::default()),
            provider.clone(),
            ScanPolicy::default(),
        );

        let err = svc.add_symbol("   ").await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ValidationError::EmptySymbol)));
        assert_eq!(err.to_string(), "Symbol is required");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn add_rejects_symbol_unknown_to_provider() {
        let svc = service(VecStore::default(), FixtureProvider::new());
        let err = svc.add_symbol("XXXX").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid symbol: XXXX");
    }

    #[tokio::test]
    async fn add_rejects_duplicate() {
        let provider = FixtureProvider::new().with_closes("SPY", &[400.0, 401.0]);
        let svc = service(VecStore::with(&["SPY"]), provider);

        let err = svc.add_symbol("spy").await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(StoreError::AlreadyExists(_))));
        assert_eq!(err.to_string(), "SPY already exists");
    }

    #[tokio::test]
    async fn remove_checks_membership() {
        let svc = service(VecStore::with(&["QQQ", "TLT"]), FixtureProvider::new());

        let missing = svc.remove_symbol("GLD").await.unwrap_err();
        assert_eq!(missing.to_string(), "GLD not found");

        let change = svc.remove_symbol("qqq").await.unwrap();
        assert_eq!(change.count, 1);
        assert_eq!(svc.list_symbols().await.unwrap(), vec!["TLT"]);
    }

    #[tokio::test]
    async fn data_ranks_tracked_universe() {
        let provider = FixtureProvider::new()
            .with_closes("AAA", &trending_with_dip(30, 20))
            .with_closes("BBB", &trending_with_dip(30, 27));
        let svc = service(VecStore::with(&["AAA", "BBB", "CCC"]), provider);

        let rows = svc.data().await.unwrap();

        let symbols: Vec<_> = rows.iter().map(|b| b.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BBB", "AAA"]);
    }

    #[tokio::test]
    async fn data_surfaces_store_failure() {
        let svc = service(BrokenStore, FixtureProvider::new());
        assert!(matches!(
            svc.data().await,
            Err(ServiceError::Store(StoreError::Backend(_)))
        ));
    }

    #[tokio::test]
    async fn chart_maps_missing_data_and_provider_faults() {
        let provider = FixtureProvider::new()
            .with_closes("DIP", &trending_with_dip(30, 24))
            .with_status("DOWN", 503);
        let svc = service(VecStore::default(), provider);

        let chart = svc.chart("dip").await.unwrap();
        assert_eq!(chart.symbol, "DIP");
        assert_eq!(chart.prices.len(), 28);
        assert_eq!(chart.reversals.len(), 1);

        assert!(matches!(svc.chart("NONE").await, Err(ServiceError::NoData)));
        assert!(matches!(
            svc.chart("DOWN").await,
            Err(ServiceError::Provider(ProviderError::Status { status: 503, .. }))
        ));
    }
}
