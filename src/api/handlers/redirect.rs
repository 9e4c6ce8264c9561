//! Handlers for trail redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a trail id to its target URL.
///
/// # Endpoint
///
/// `GET /{trail_id}`
///
/// # Request Flow
///
/// 1. Validate the id against the configured alphabet and length
/// 2. Resolve it through the cache-aside engine
/// 3. Return 302 Found with the target in `Location`
///
/// # Errors
///
/// Returns 400 Bad Request for malformed ids, 404 Not Found for unknown or
/// expired ids and 500 if the store is unavailable.
pub async fn redirect_handler(
    Path(trail_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    state.id_generator.validate(&trail_id)?;

    let Some(url) = state.trail_service.lookup(&trail_id).await? else {
        return Err(AppError::not_found(
            "Trail not found",
            json!({ "trail_id": trail_id }),
        ));
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// `GET /` has nothing to serve.
pub async fn root_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
