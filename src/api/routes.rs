//! Route configuration for the redirect server.

use crate::api::handlers::{health_handler, not_found_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes.
///
/// # Endpoints
///
/// - `GET /health`   - Store health check
/// - `GET /{alias}`  - Redirect to the target URL
///
/// Anything else, including `/`, answers 404.
pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .fallback(not_found_handler)
        .with_state(state)
}
