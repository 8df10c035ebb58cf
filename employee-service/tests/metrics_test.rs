use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use employee_service::{
    build_router,
    services::{init_metrics, InMemoryEmployeeStore},
    startup::AppState,
};
use std::sync::{Arc, Once};
use tower::util::ServiceExt;

// The recorder is process-global; install it once for every test in this binary.
static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn metrics_endpoint_renders_request_and_store_counters() {
    ensure_metrics_initialized();
    let app = build_router(AppState::new(Arc::new(InMemoryEmployeeStore::new())));

    let response = get(&app, "/api/employees").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    assert!(!body.contains("not initialized"), "recorder missing: {body}");
    assert!(body.contains("http_requests_total"), "{body}");
    assert!(body.contains("http_request_duration_seconds"), "{body}");

    let store_line = body
        .lines()
        .find(|line| {
            line.starts_with("employee_store_operations_total{")
                && line.contains(r#"operation="list_all""#)
        })
        .unwrap_or_else(|| panic!("no list_all store counter in: {body}"));
    assert!(store_line.contains(r#"status="ok""#), "{store_line}");
}

#[tokio::test]
async fn store_counter_tracks_conflicting_creates_as_errors() {
    ensure_metrics_initialized();
    let app = build_router(AppState::new(Arc::new(InMemoryEmployeeStore::new())));

    let payload = r#"{"id":"507f1f77bcf86cd799439011","name":"Ann"}"#;
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/employees")
            .header("content-type", "application/json")
            .body(Body::from(payload))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected);
    }

    let body = body_text(get(&app, "/metrics").await).await;
    let has_line = |status: &str| {
        body.lines().any(|line| {
            line.starts_with("employee_store_operations_total{")
                && line.contains(r#"operation="create""#)
                && line.contains(&format!(r#"status="{status}""#))
        })
    };
    assert!(has_line("ok"), "{body}");
    assert!(has_line("error"), "{body}");
}
