pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{middleware::from_fn, routing::get, Router};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use tower_http::trace::TraceLayer;

use crate::handlers::EMPLOYEES_PATH;
use crate::startup::AppState;

/// Assemble the HTTP surface: employee CRUD plus health, readiness, and metrics.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            EMPLOYEES_PATH,
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            &format!("{}/:id", EMPLOYEES_PATH),
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outside the trace layer so the span sees the generated id.
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}
