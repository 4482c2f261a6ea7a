use crate::error::{ProviderError, StoreError};
use crate::models::PriceSeries;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Source of daily closing prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches up to `lookback_days` calendar days of daily bars for `symbol`.
    async fn fetch(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries, ProviderError>;

    fn name(&self) -> &str;
}

/// Persistent set of tracked ticker symbols.
///
/// Implementations receive already-normalized (trimmed, uppercase) symbols.
#[async_trait]
pub trait SymbolStore: Send + Sync {
    async fn list(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Fails with [`StoreError::AlreadyExists`] when the symbol is present.
    async fn add(&self, symbol: &str) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`] when the symbol is absent.
    async fn remove(&self, symbol: &str) -> Result<(), StoreError>;
}
