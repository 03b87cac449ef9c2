//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response Codes
///
/// - **302 Found**: alias resolved, `Location` holds the target
/// - **404 Not Found**: alias was never allocated
/// - **500 Internal Server Error**: the store failed, or the stored target
///   cannot be sent as a header
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    info!(alias = %alias, "Received redirect request");

    match state.shortener.resolve(&alias).await {
        Ok(target) => {
            let location = location_header(&target).map_err(|e| {
                error!(alias = %alias, error = %e, "Stored target is not a valid Location");
                AppError::internal("Stored target is not a valid redirect", json!({}))
            })?;
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Err(e) if e.is_not_found() => {
            warn!(alias = %alias, "Alias not found");
            Err(e.into())
        }
        Err(e) => {
            error!(alias = %alias, error = %e, "Failed to get URL from storage");
            Err(e.into())
        }
    }
}

/// Answers every path that is not a single alias segment, including `/`.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Short link not found", json!({}))
}

/// Builds the `Location` value, percent-escaping every non-ASCII byte.
///
/// ASCII control characters are still rejected by [`HeaderValue`].
fn location_header(target: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
    let mut escaped = String::with_capacity(target.len());
    for byte in target.bytes() {
        if byte.is_ascii() {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{:02x}", byte));
        }
    }
    HeaderValue::from_str(&escaped)
}
