//! Handler for trail creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::debug;
use validator::Validate;

use crate::api::dto::create_trail::{CreateTrailRequest, CreateTrailResponse};
use crate::domain::error::TrailError;
use crate::error::AppError;
use crate::state::AppState;

/// Extra allocate-and-create rounds after an id conflict.
const CONFLICT_RETRIES: usize = 3;

/// Pause between conflict retries.
const CONFLICT_RETRY_DELAY_MS: u64 = 5;

/// Creates a trail under a freshly allocated id.
///
/// # Endpoint
///
/// `POST /api/v1/create_trail`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "expireAt": "2030-01-15T06:46:00.000Z"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "4CsBN6",
///   "shortUrl": "https://s.example.com/4CsBN6",
///   "expireAt": "2030-01-15T06:46:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, invalid URL or non-future
/// `expireAt`; 409 Conflict if no id could be claimed after retrying; 500 if
/// the store is unavailable.
pub async fn create_trail_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateTrailRequest>, JsonRejection>,
) -> Result<Json<CreateTrailResponse>, AppError> {
    let Json(payload) =
        payload.map_err(|e| AppError::bad_request(e.body_text(), json!({})))?;

    payload.validate()?;
    payload.ensure_future_expiry(Utc::now())?;

    let CreateTrailRequest { url, expire_at } = payload;

    let strategy = FixedInterval::from_millis(CONFLICT_RETRY_DELAY_MS).take(CONFLICT_RETRIES);

    let trail = RetryIf::spawn(
        strategy,
        || {
            state.trail_service.allocate_and_create(
                || state.id_generator.generate(),
                url.clone(),
                expire_at,
            )
        },
        |e: &TrailError| {
            if e.is_conflict() {
                debug!("Retrying trail creation after conflict: {}", e);
            }
            e.is_conflict()
        },
    )
    .await?;

    Ok(Json(CreateTrailResponse {
        short_url: state.short_url(&trail.id),
        id: trail.id,
        expire_at: trail.expire_at,
    }))
}
