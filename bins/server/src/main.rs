//! Freightbook API Server
//!
//! Main entry point for the Freightbook reporting service.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freightbook_api::{AppState, create_router};
use freightbook_core::aggregator::InMemoryDataSource;
use freightbook_shared::AppConfig;

/// Loads the tenant snapshot, or starts empty if the file does not exist.
async fn load_source(path: &str) -> anyhow::Result<InMemoryDataSource> {
    if !Path::new(path).exists() {
        warn!(path, "Snapshot file not found, serving no tenants");
        return Ok(InMemoryDataSource::new());
    }

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {path}"))?;
    let source = InMemoryDataSource::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot {path}"))?;
    info!(path, tenants = source.tenant_count(), "Snapshot loaded");
    Ok(source)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freightbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        recognition = %config.reporting.recognition,
        fuel_accounting = %config.reporting.fuel_accounting,
        cache_ttl_secs = config.cache.ttl_secs,
        "Reporting configured"
    );

    // Create application state
    let source = load_source(&config.data.snapshot_path).await?;
    let state = AppState::new(Arc::new(source), &config);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
