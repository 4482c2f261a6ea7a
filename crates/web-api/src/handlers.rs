use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    Json,
};
use reversal_core::{ChartSeries, MetricBundle};
use reversal_scanner::{ReversalService, SymbolChange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ranked rows must never be served from a cache.
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

#[derive(Serialize)]
pub struct SymbolListResponse {
    pub symbols: Vec<String>,
    pub count: usize,
}

#[derive(Deserialize)]
pub struct SymbolRequest {
    #[serde(default)]
    pub symbol: String,
}

#[derive(Serialize)]
pub struct SymbolChangeResponse {
    pub success: bool,
    pub symbol: String,
    pub count: usize,
}

impl From<SymbolChange> for SymbolChangeResponse {
    fn from(change: SymbolChange) -> Self {
        Self {
            success: true,
            symbol: change.symbol,
            count: change.count,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Scans the tracked universe and returns the ranked rows.
///
/// # Errors
/// Returns `500` if the universe cannot be listed.
pub async fn get_data(State(service): State<Arc<ReversalService>>) -> Result<Response, ApiError> {
    let rows: Vec<MetricBundle> = service.data().await?;
    Ok(([(CACHE_CONTROL, NO_STORE)], Json(rows)).into_response())
}

/// Price, MA3 and reversal points for one symbol.
///
/// # Errors
/// Returns `404` when there is no data and `400` for a malformed symbol.
pub async fn get_chart(
    State(service): State<Arc<ReversalService>>,
    Path(symbol): Path<String>,
) -> Result<Json<ChartSeries>, ApiError> {
    Ok(Json(service.chart(&symbol).await?))
}

/// # Errors
/// Returns `500` if the store cannot be read.
pub async fn list_symbols(
    State(service): State<Arc<ReversalService>>,
) -> Result<Json<SymbolListResponse>, ApiError> {
    let symbols = service.list_symbols().await?;
    Ok(Json(SymbolListResponse {
        count: symbols.len(),
        symbols,
    }))
}

/// # Errors
/// Returns `400` for an unreadable body or an empty, invalid or duplicate
/// symbol, and `500` on store failure.
pub async fn add_symbol(
    State(service): State<Arc<ReversalService>>,
    body: Result<Json<SymbolRequest>, JsonRejection>,
) -> Result<Json<SymbolChangeResponse>, ApiError> {
    let Json(req) = body?;
    let change = service.add_symbol(&req.symbol).await?;
    Ok(Json(change.into()))
}

/// # Errors
/// Returns `400` for an unreadable body or empty symbol, `404` if it is not
/// tracked and `500` on store failure.
pub async fn remove_symbol(
    State(service): State<Arc<ReversalService>>,
    body: Result<Json<SymbolRequest>, JsonRejection>,
) -> Result<Json<SymbolChangeResponse>, ApiError> {
    let Json(req) = body?;
    let change = service.remove_symbol(&req.symbol).await?;
    Ok(Json(change.into()))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
