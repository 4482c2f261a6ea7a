use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use reversal_scanner::ReversalService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    service: Arc<ReversalService>,
}

impl ApiServer {
    #[must_use]
    pub const fn new(service: Arc<ReversalService>) -> Self {
        Self { service }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/data", get(handlers::get_data))
            .route("/api/chart/:symbol", get(handlers::get_chart))
            .route("/api/symbols", get(handlers::list_symbols))
            .route("/api/symbols/add", post(handlers::add_symbol))
            .route("/api/symbols/remove", post(handlers::remove_symbol))
            .route("/health", get(handlers::health))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
