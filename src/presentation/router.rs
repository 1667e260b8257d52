// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_json, health_check, list_regions, show_dashboard};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_dashboard))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/regions", get(list_regions))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
