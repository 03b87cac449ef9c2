//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{alias}` - Short link redirect
//! - `GET  /health`  - Health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline, answers 408 when exceeded
//!
//! Paths are matched verbatim: `/a1B2/` is not the alias `a1B2`.

use std::time::Duration;

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline for a single request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    api::routes::public_routes(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(tracing::layer())
}
