use async_trait::async_trait;
use reversal_core::{StoreError, SymbolStore};
use std::collections::BTreeSet;
use tokio::sync::RwLock;

/// In-process universe. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySymbolStore {
    symbols: RwLock<BTreeSet<String>>,
}

impl MemorySymbolStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: RwLock::new(symbols.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl SymbolStore for MemorySymbolStore {
    async fn list(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.symbols.read().await.clone())
    }

    async fn add(&self, symbol: &str) -> Result<(), StoreError> {
        if self.symbols.write().await.insert(symbol.to_string()) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists(symbol.to_string()))
        }
    }

    async fn remove(&self, symbol: &str) -> Result<(), StoreError> {
        if self.symbols.write().await.remove(symbol) {
            Ok(())
        } else {
            Err(StoreError::NotFound(symbol.to_string()))
        }
    }
}
