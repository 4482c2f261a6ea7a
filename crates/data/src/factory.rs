use crate::stores::{FileSymbolStore, MemorySymbolStore, PgSymbolStore};
use crate::yahoo::YahooChartProvider;
use anyhow::Context;
use reversal_core::config::{ProviderConfig, UniverseBackend, UniverseConfig};
use reversal_core::{PriceProvider, SymbolStore};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Builds the symbol store selected by `universe.backend`.
///
/// # Errors
/// Returns an error if the postgres backend is selected with an empty
/// `database_url` or the database cannot be reached.
pub async fn build_symbol_store(universe: &UniverseConfig) -> anyhow::Result<Arc<dyn SymbolStore>> {
    let store: Arc<dyn SymbolStore> = match universe.backend {
        UniverseBackend::Memory => {
            let symbols: BTreeSet<String> = if universe.seed_defaults {
                crate::DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect()
            } else {
                BTreeSet::new()
            };
            Arc::new(MemorySymbolStore::with_symbols(symbols))
        }
        UniverseBackend::File => Arc::new(FileSymbolStore::new(&universe.path, universe.seed_defaults)),
        UniverseBackend::Postgres => {
            let url = universe.database_url.trim();
            if url.is_empty() {
                anyhow::bail!("universe.database_url is required for the postgres backend");
            }
            let store = PgSymbolStore::connect(url, universe.max_connections, universe.seed_defaults)
                .await
                .context("Failed to connect to symbol database")?;
            Arc::new(store)
        }
    };

    tracing::info!("Symbol universe backend: {:?}", universe.backend);
    Ok(store)
}

/// Builds the daily-close provider.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_price_provider(provider: &ProviderConfig) -> anyhow::Result<Arc<dyn PriceProvider>> {
    let yahoo = YahooChartProvider::from_config(provider).context("Failed to build price provider")?;
    Ok(Arc::new(yahoo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_respects_seeding() {
        let mut universe = UniverseConfig {
            backend: UniverseBackend::Memory,
            ..UniverseConfig::default()
        };

        let seeded = build_symbol_store(&universe).await.unwrap();
        assert_eq!(seeded.list().await.unwrap().len(), crate::DEFAULT_SYMBOLS.len());

        universe.seed_defaults = false;
        let empty = build_symbol_store(&universe).await.unwrap();
        assert!(empty.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn postgres_backend_requires_url() {
        let universe = UniverseConfig {
            backend: UniverseBackend::Postgres,
            database_url: String::new(),
            ..UniverseConfig::default()
        };
        let err = build_symbol_store(&universe).await.err().unwrap();
        assert!(err.to_string().contains("database_url"));
    }

    #[test]
    fn provider_uses_configured_base_url() {
        let config = ProviderConfig {
            base_url: "http://127.0.0.1:9/chart/".to_string(),
            ..ProviderConfig::default()
        };
        let provider = build_price_provider(&config).unwrap();
        assert_eq!(provider.name(), "yahoo");
    }
}
