//! Routing module for the storefront application

use std::time::Duration;

use axum::{
    http::{Request, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: request tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::catalog::routes())
        .merge(crate::cart::routes())
        .merge(crate::session::routes())
        .layer(trace_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Endpoint: GET /health
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
