//! HTTP routes

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    handlers::{advisory, form, health},
    middleware::RequestIdLayer,
    state::AppState,
};

/// Largest accepted request body; a location never comes close
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Form entry point
        .route("/", get(form::show_form).post(form::submit_form))
        // JSON API
        .route("/v1/advisory", post(advisory::create_advisory))
        // Health checks
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(RequestIdLayer::new())
        .with_state(state)
}
