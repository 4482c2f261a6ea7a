//! Price data and symbol universe storage for the reversal scanner.
//!
//! This crate provides:
//! - A Yahoo chart API client implementing [`PriceProvider`](reversal_core::PriceProvider)
//! - Memory, JSON-file and `PostgreSQL` symbol stores
//! - The default seed universe

pub mod defaults;
pub mod factory;
pub mod stores;
pub mod yahoo;

pub use defaults::DEFAULT_SYMBOLS;
pub use factory::{build_price_provider, build_symbol_store};
pub use stores::{FileSymbolStore, MemorySymbolStore, PgSymbolStore};
pub use yahoo::{YahooChartProvider, YAHOO_CHART_URL};
