//! Multi-symbol reversal scanning.
//!
//! This crate provides:
//! - Single-symbol evaluation (fetch, then detect and measure)
//! - The bounded-concurrency [`Aggregator`] that ranks a universe
//! - [`ReversalService`], the facade used by the HTTP server and CLI

pub mod aggregator;
pub mod error;
pub mod evaluate;
pub mod service;

#[cfg(test)]
mod testing;

pub use aggregator::{rank, Aggregator, Omission, OmittedSymbol, ScanPolicy, ScanReport};
pub use error::{EvaluationError, ServiceError};
pub use evaluate::evaluate_symbol;
pub use service::{ReversalService, SymbolChange, VALIDATION_LOOKBACK_DAYS};
