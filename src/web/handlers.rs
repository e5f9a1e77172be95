use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use tracing::{debug, error};

use super::view::{render_grid, GridView};
use super::AppState;
use crate::error::GridResult;

/// Evaluate the visible page for today
async fn current_view(state: &AppState) -> GridResult<GridView> {
    let config = state.config.read().await;
    let zone = config.zone()?;
    let date = zone.today();

    let dashboard = state.dashboard.read().await;
    GridView::build(&dashboard, &config.grid, &zone, date)
}

/// Handler for the grid page
pub async fn grid_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let view = current_view(&state).await.map_err(|e| {
        error!("Failed to build grid view: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let refresh_secs = state.config.read().await.page_interval_secs;

    render_grid(&view, refresh_secs).map(Html).map_err(|e| {
        error!("Failed to render grid: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handler for the JSON view of the grid page
pub async fn grid_json_handler(
    State(state): State<AppState>,
) -> Result<Json<GridView>, StatusCode> {
    current_view(&state).await.map(Json).map_err(|e| {
        error!("Failed to build grid view: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handler for the Previous button
pub async fn previous_page_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.previous_page();
    debug!("Manual page change to {}", dashboard.pager().current());
    Redirect::to("/")
}

/// Handler for the Next button
pub async fn next_page_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.next_page();
    debug!("Manual page change to {}", dashboard.pager().current());
    Redirect::to("/")
}

/// Handler for the numbered page buttons
pub async fn go_to_page_handler(
    State(state): State<AppState>,
    Path(number): Path<usize>,
) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.go_to_page(number);
    debug!("Manual page change to {}", dashboard.pager().current());
    Redirect::to("/")
}

/// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
