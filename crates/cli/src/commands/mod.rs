//! CLI commands for the reversal scanner.

pub mod chart;
pub mod scan;
pub mod serve;
pub mod symbols;

pub use chart::{run_chart, ChartArgs};
pub use scan::{run_scan, ScanArgs};
pub use serve::{run_serve, ServeArgs};
pub use symbols::{run_symbols, SymbolsCommand};

use anyhow::Context;
use reversal_core::{AppConfig, ConfigLoader};
use reversal_scanner::{ReversalService, ScanPolicy};

pub fn load_config(path: &str, profile: Option<&str>) -> anyhow::Result<AppConfig> {
    ConfigLoader::load_layered(path, profile)
        .with_context(|| format!("Failed to load configuration from {path}"))
}

/// Wires the configured store and provider into a service.
pub async fn build_service(config: &AppConfig) -> anyhow::Result<ReversalService> {
    let store = reversal_data::build_symbol_store(&config.universe).await?;
    let provider = reversal_data::build_price_provider(&config.provider)?;
    let policy = ScanPolicy::from_config(&config.scan, &config.provider);
    Ok(ReversalService::new(store, provider, policy))
}
