use axum::{http::StatusCode, routing::get, Json, Router};
use classroomview::components::availability::{fetch_availability, fetch_calendar, fetch_classrooms};
use classroomview::config::Config;
use classroomview::error::Error;
use reqwest::Client;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral local port and return its base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config_for(base: &str) -> Config {
    Config {
        classrooms_url: Some(format!("{}/classrooms", base)),
        calendar_url: Some(format!("{}/calendar", base)),
        ..Config::default()
    }
}

fn calendar_body() -> Value {
    json!({
        "success": true,
        "data": [
            {
                "userEmail": "room-b@school.example",
                "userEvent": [{
                    "StartTime": "2024-01-15T09:00:00",
                    "EndTime": "2024-01-15T10:00:00",
                    "BusyType": "Busy"
                }]
            },
            { "userEmail": "room-a@school.example", "userEvent": [] }
        ]
    })
}

#[tokio::test]
async fn merges_classroom_list_into_calendar_data() {
    let app = Router::new()
        .route(
            "/classrooms",
            get(|| async { Json(json!(["room-c@school.example", "room-a@school.example"])) }),
        )
        .route("/calendar", get(|| async { Json(calendar_body()) }));
    let base = serve(app).await;

    let users = fetch_availability(&Client::new(), &config_for(&base))
        .await
        .unwrap();

    let emails: Vec<&str> = users.iter().map(|u| u.user_email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "room-a@school.example",
            "room-b@school.example",
            "room-c@school.example"
        ]
    );
    assert_eq!(users[1].user_event.len(), 1);
    assert!(users[2].user_event.is_empty());
}

#[tokio::test]
async fn unconfigured_endpoints_yield_empty_data() {
    let users = fetch_availability(&Client::new(), &Config::default())
        .await
        .unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn null_classroom_list_counts_as_empty() {
    let app = Router::new()
        .route("/classrooms", get(|| async { Json(Value::Null) }))
        .route("/calendar", get(|| async { Json(calendar_body()) }));
    let base = serve(app).await;

    let classrooms = fetch_classrooms(&Client::new(), Some(&format!("{}/classrooms", base)))
        .await
        .unwrap();
    assert!(classrooms.is_empty());

    let users = fetch_availability(&Client::new(), &config_for(&base))
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn unsuccessful_calendar_keeps_classrooms() {
    let app = Router::new()
        .route("/classrooms", get(|| async { Json(json!(["room-x@school.example"])) }))
        .route(
            "/calendar",
            get(|| async { Json(json!({ "success": false, "data": [] })) }),
        );
    let base = serve(app).await;

    let calendar = fetch_calendar(&Client::new(), Some(&format!("{}/calendar", base)))
        .await
        .unwrap();
    assert!(calendar.is_empty());

    let users = fetch_availability(&Client::new(), &config_for(&base))
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_email, "room-x@school.example");
    assert!(users[0].user_event.is_empty());
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let app = Router::new()
        .route("/classrooms", get(|| async { Json(json!([])) }))
        .route(
            "/calendar",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
        );
    let base = serve(app).await;

    let err = fetch_availability(&Client::new(), &config_for(&base))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn malformed_body_is_a_fetch_failure() {
    let app = Router::new()
        .route("/classrooms", get(|| async { "definitely not json" }))
        .route("/calendar", get(|| async { Json(calendar_body()) }));
    let base = serve(app).await;

    assert!(fetch_availability(&Client::new(), &config_for(&base))
        .await
        .is_err());
}

#[tokio::test]
async fn unreachable_endpoint_is_an_http_error() {
    // Bind then drop so the port is closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetch_classrooms(&Client::new(), Some(&format!("http://{}/classrooms", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
