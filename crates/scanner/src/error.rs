use reversal_core::{ProviderError, StoreError, ValidationError};
use std::time::Duration;
use thiserror::Error;

/// Why a single symbol produced no ranking row. Never aborts a scan.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Insufficient history: {observations} observations, need {required}")]
    InsufficientHistory { observations: usize, required: usize },

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Evaluation task failed: {0}")]
    TaskFailed(String),
}

/// Failures surfaced by [`crate::ReversalService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider has no recent data for a symbol being added.
    #[error("Invalid symbol: {0}")]
    UnknownSymbol(String),

    #[error("No data found")]
    NoData,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
