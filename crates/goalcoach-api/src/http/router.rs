//! Axum router configuration with middleware.
//!
//! The dashboard posts to `/api/generate-feedback`; `/api/v1/feedback` is the
//! same handler under the versioned prefix.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/generate-feedback",
            post(handlers::feedback::generate_feedback),
        )
        .route("/api/v1/feedback", post(handlers::feedback::generate_feedback))
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
