//! JSON-file backed symbol universe.
//!
//! The file holds a sorted JSON array of tickers. Writes go to a sibling temp
//! file that is renamed over the original, so a crash never leaves a torn file.

use crate::defaults::DEFAULT_SYMBOLS;
use async_trait::async_trait;
use reversal_core::{StoreError, SymbolStore};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct FileSymbolStore {
    path: PathBuf,
    seed_defaults: bool,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSymbolStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, seed_defaults: bool) -> Self {
        Self {
            path: path.into(),
            seed_defaults,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<BTreeSet<String>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let symbols: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
                    StoreError::Backend(format!("{} is not a JSON array: {e}", self.path.display()))
                })?;
                Ok(Some(symbols.into_iter().collect()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend(&self.path, &e)),
        }
    }

    async fn write(&self, symbols: &BTreeSet<String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| backend(parent, &e))?;
        }

        let json = serde_json::to_vec_pretty(symbols)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| backend(&tmp, &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| backend(&self.path, &e))?;

        Ok(())
    }

    /// Current contents, seeding the file with the default universe when it
    /// does not exist yet (or is empty) and seeding is enabled.
    async fn load(&self) -> Result<BTreeSet<String>, StoreError> {
        let current = self.read().await?;
        let needs_seed = current.as_ref().map_or(true, BTreeSet::is_empty);

        if needs_seed && self.seed_defaults {
            let seeded: BTreeSet<String> = DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect();
            self.write(&seeded).await?;
            tracing::info!(
                "Initialized {} with {} default symbols",
                self.path.display(),
                seeded.len()
            );
            return Ok(seeded);
        }

        Ok(current.unwrap_or_default())
    }
}

fn backend(path: &Path, e: &std::io::Error) -> StoreError {
    StoreError::Backend(format!("{}: {e}", path.display()))
}

#[async_trait]
impl SymbolStore for FileSymbolStore {
    async fn list(&self) -> Result<BTreeSet<String>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn add(&self, symbol: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut symbols = self.load().await?;
        if !symbols.insert(symbol.to_string()) {
            return Err(StoreError::AlreadyExists(symbol.to_string()));
        }
        self.write(&symbols).await
    }

    async fn remove(&self, symbol: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut symbols = self.load().await?;
        if !symbols.remove(symbol) {
            return Err(StoreError::NotFound(symbol.to_string()));
        }
        self.write(&symbols).await
    }
}
