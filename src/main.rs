// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::view::DashboardView;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::csv_source::CsvDatasetSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config().context("Failed to load config/dashboard.toml")?;

    // Load the dataset once; any failure aborts startup
    let source = Arc::new(CsvDatasetSource::new(app_config.data.path.clone()));
    let service = DashboardService::bootstrap(source, app_config.dashboard.clone())
        .await
        .context("Failed to load unemployment data")?;
    if let Some(mean) = service.dataset().overall_mean() {
        tracing::info!("Overall average unemployment rate {:.2}%", mean);
    }

    let initial = service
        .resolve_selection(&app_config.dashboard.default_region)
        .context("Invalid dashboard.default_region")?;

    let state = Arc::new(AppState {
        view: DashboardView::new(service, initial),
    });
    let router = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((app_config.server.host.as_str(), app_config.server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", app_config.server.host, app_config.server.port))?;
    let addr = listener.local_addr()?;
    println!("India Unemployment Dashboard running at http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
