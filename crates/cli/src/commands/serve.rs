use anyhow::Result;
use clap::Args;
use reversal_core::AppConfig;
use reversal_web_api::ApiServer;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen address, overriding `server.host` and `server.port`
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Runs the HTTP server until it is stopped.
///
/// # Errors
/// Returns an error if the service cannot be built or the address cannot be bound.
pub async fn run_serve(config: AppConfig, args: ServeArgs) -> Result<()> {
    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    let service = super::build_service(&config).await?;

    ApiServer::new(Arc::new(service)).serve(&addr).await
}
