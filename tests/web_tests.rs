use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use classroomview::components::availability::models::{
    BusyType, CalendarEvent, EventTimestamp, UserAvailability,
};
use classroomview::config::Config;
use classroomview::dashboard::DashboardState;
use classroomview::error::fetch_error;
use classroomview::utils::time::GridZone;
use classroomview::web::{router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

const TIMEZONE: &str = "Europe/Helsinki";

fn test_state() -> AppState {
    let config = Config {
        timezone: Some(TIMEZONE.to_string()),
        ..Config::default()
    };
    AppState {
        dashboard: DashboardState::shared(config.grid.columns_per_page),
        config: Arc::new(RwLock::new(config)),
    }
}

/// A classroom busy from 09:00 to 09:30 today
fn busy_this_morning(email: &str) -> UserAvailability {
    let today = GridZone::named(TIMEZONE).unwrap().today();
    UserAvailability {
        user_email: email.to_string(),
        user_event: vec![CalendarEvent {
            start_time: EventTimestamp::parse(&format!("{}T09:00:00", today)),
            end_time: EventTimestamp::parse(&format!("{}T09:30:00", today)),
            busy_type: BusyType::Busy,
        }],
    }
}

fn many_rooms(count: usize) -> Vec<UserAvailability> {
    (0..count)
        .map(|i| UserAvailability::empty(format!("room-r{:02}@school.example", i)))
        .collect()
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
    let response = router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post(state: &AppState, uri: &str) -> (StatusCode, Option<String>) {
    let response = router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    (response.status(), location)
}

#[tokio::test]
async fn shows_loading_before_first_poll() {
    let state = test_state();
    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Loading..."));
}

#[tokio::test]
async fn shows_generic_error_after_failed_poll() {
    let state = test_state();
    state
        .dashboard
        .write()
        .await
        .reconcile(Err(fetch_error("HTTP 401 - bad code")));

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: An error occurred while fetching data."));
    assert!(!body.contains("bad code"));
}

#[tokio::test]
async fn renders_busy_and_free_cells() {
    let state = test_state();
    state.dashboard.write().await.reconcile(Ok(vec![
        UserAvailability::empty("lobby@school.example"),
        busy_this_morning("room-aurora@school.example"),
    ]));

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>Aurora</th>"));
    assert!(body.contains("<th>lobby@school.example</th>"));
    assert!(body.contains("class=\"busy-cell\""));
    assert!(body.contains("class=\"free-cell\""));

    let (_, json) = get(&state, "/api/grid").await;
    let view: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(view["status"], "ready");
    let nine = view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["slot"] == "09:00")
        .unwrap();
    assert_eq!(nine["cells"][0]["busy"], false);
    assert_eq!(nine["cells"][1]["busy"], true);
    let half_past = view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["slot"] == "09:30")
        .unwrap();
    assert_eq!(half_past["cells"][1]["busy"], false);
}

#[tokio::test]
async fn page_controls_move_the_shared_index() {
    let state = test_state();
    state.dashboard.write().await.reconcile(Ok(many_rooms(25)));

    let (status, location) = post(&state, "/page/next").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(state.dashboard.read().await.pager().current(), 2);

    post(&state, "/page/3").await;
    assert_eq!(state.dashboard.read().await.pager().current(), 3);

    // Next on the last page is a no-op
    post(&state, "/page/next").await;
    assert_eq!(state.dashboard.read().await.pager().current(), 3);

    post(&state, "/page/previous").await;
    assert_eq!(state.dashboard.read().await.pager().current(), 2);

    // Out-of-range page numbers are clamped
    post(&state, "/page/42").await;
    assert_eq!(state.dashboard.read().await.pager().current(), 3);

    let (_, json) = get(&state, "/api/grid").await;
    let view: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(view["total_pages"], 3);
    assert_eq!(view["current_page"], 3);
    assert_eq!(view["columns"].as_array().unwrap().len(), 5);
    assert_eq!(view["has_next"], false);
}

#[tokio::test]
async fn empty_data_renders_empty_grid() {
    let state = test_state();
    state.dashboard.write().await.reconcile(Ok(Vec::new()));

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>Time</th>"));
    assert!(body.contains("07:00"));
    assert!(!body.contains("class=\"busy-cell\""));
    assert!(!body.contains("class=\"free-cell\""));
}

#[tokio::test]
async fn health_check() {
    let state = test_state();
    let (status, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
