use std::sync::Arc;

use anyhow::Context;
use db::DBService;
use server::{AppState, config::ServerConfig, router};
use services::services::{dashboard::NoDataProvider, template_catalog::TemplateCatalog};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utils::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info,sqlx=warn");

    let config = ServerConfig::from_env();
    let db = DBService::new(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;
    let catalog = TemplateCatalog::load()?;
    let state = AppState::new(db, catalog, Arc::new(NoDataProvider));

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
