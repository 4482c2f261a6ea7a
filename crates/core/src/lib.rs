pub mod config;
pub mod config_loader;
pub mod error;
pub mod models;
pub mod symbol;
pub mod traits;

pub use config::{AppConfig, ProviderConfig, ScanConfig, ServerConfig, UniverseBackend, UniverseConfig};
pub use config_loader::ConfigLoader;
pub use error::{ChartError, ProviderError, StoreError, ValidationError};
pub use models::{
    AveragedPoint, ChartSeries, MetricBundle, PriceBar, PriceSeries, ReversalPoint, WorkingPoint,
};
pub use symbol::normalize_symbol;
pub use traits::{PriceProvider, SymbolStore};
