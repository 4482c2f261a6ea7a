use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub scan: ScanConfig,
    pub universe: UniverseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Settings for the historical price source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the Yahoo Finance chart API.
    pub base_url: String,
    /// Calendar days of daily bars requested per symbol.
    pub lookback_days: u32,
    /// Outbound request quota shared by all scan workers.
    pub requests_per_second: u32,
    /// Hard cap on a single HTTP exchange.
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl ProviderConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            lookback_days: 60,
            requests_per_second: 10,
            request_timeout_secs: 20,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
        }
    }
}

/// Aggregation policy applied to every scan of the universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum evaluations in flight at once.
    pub max_concurrency: usize,
    /// Deadline for a single symbol's fetch + evaluation.
    pub per_symbol_timeout_secs: u64,
    /// Raw observations required before a symbol is evaluated.
    pub min_observations: usize,
}

impl ScanConfig {
    #[must_use]
    pub const fn per_symbol_timeout(&self) -> Duration {
        Duration::from_secs(self.per_symbol_timeout_secs)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            per_symbol_timeout_secs: 30,
            min_observations: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniverseBackend {
    Memory,
    File,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseConfig {
    pub backend: UniverseBackend,
    /// JSON file used by the `file` backend.
    pub path: PathBuf,
    /// Connection string used by the `postgres` backend.
    pub database_url: String,
    pub max_connections: u32,
    /// Populate an empty store with the built-in symbol list on first read.
    pub seed_defaults: bool,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            backend: UniverseBackend::File,
            path: PathBuf::from("data/symbols.json"),
            database_url: "postgresql://localhost/reversal_radar".to_string(),
            max_connections: 5,
            seed_defaults: true,
        }
    }
}
