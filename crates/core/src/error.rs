//! Error taxonomy shared by the collaborators and the scan pipeline.

use thiserror::Error;

/// Rejected request input. Raised before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Symbol is required")]
    EmptySymbol,

    #[error("Invalid symbol: {0}")]
    MalformedSymbol(String),
}

/// Failures returned by a [`crate::PriceProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unknown symbol, or the provider returned no bars for it.
    #[error("No data found for {symbol}")]
    NotFound { symbol: String },

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed provider payload: {0}")]
    Malformed(String),
}

impl ProviderError {
    #[must_use]
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures returned by a [`crate::SymbolStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Symbol store failure: {0}")]
    Backend(String),
}

/// Chart projection could not produce a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("No data found")]
    NotFound,
}
