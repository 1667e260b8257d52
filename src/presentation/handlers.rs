// HTTP request handlers
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::html_response::dashboard_page;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page, applying `?region=` as a selection event first
pub async fn show_dashboard(
    Query(query): Query<RegionQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let dashboard = apply_selection(&state, query.region.as_deref()).await;
    let options = state.view.service().selectable_regions();
    dashboard_page(&dashboard, &options)
}

/// Same as the page, as JSON
pub async fn dashboard_json(
    Query(query): Query<RegionQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Dashboard> {
    Json(apply_selection(&state, query.region.as_deref()).await)
}

/// Selector values, "All" first
pub async fn list_regions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.view.service().selectable_regions())
}

async fn apply_selection(state: &AppState, region: Option<&str>) -> Dashboard {
    let Some(region) = region else {
        return state.view.current().await;
    };

    match state.view.on_region_selected(region).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            let kept = state.view.selection().await;
            tracing::warn!("Ignoring selection event: {}; keeping '{}'", e, kept);
            state.view.current().await
        }
    }
}
