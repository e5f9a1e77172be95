mod handlers;
pub mod view;

use crate::config::Config;
use crate::dashboard::SharedDashboard;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use handlers::{
    go_to_page_handler, grid_handler, grid_json_handler, health_handler, next_page_handler,
    previous_page_handler,
};

#[derive(Clone)]
pub struct AppState {
    /// Shared configuration
    pub config: Arc<RwLock<Config>>,
    /// Grid data and page index
    pub dashboard: SharedDashboard,
}

/// Build the router serving the grid
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(grid_handler))
        .route("/api/grid", get(grid_json_handler))
        .route("/page/previous", post(previous_page_handler))
        .route("/page/next", post(next_page_handler))
        .route("/page/{number}", post(go_to_page_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
