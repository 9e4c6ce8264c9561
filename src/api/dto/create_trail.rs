//! DTOs for the trail creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Request to create a trail.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrailRequest {
    /// Redirect target; must be an absolute URI.
    #[validate(url(message = "\"url\" must be a valid uri"))]
    pub url: String,

    /// Optional expiry; must be strictly in the future.
    pub expire_at: Option<DateTime<Utc>>,
}

impl CreateTrailRequest {
    /// Rejects an `expireAt` that is not after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the expiry is at or before `now`.
    pub fn ensure_future_expiry(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        match self.expire_at {
            Some(expire_at) if expire_at <= now => Err(AppError::bad_request(
                "\"expireAt\" must be greater than \"now\"",
                json!({ "expireAt": expire_at }),
            )),
            _ => Ok(()),
        }
    }
}

/// Created trail as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrailResponse {
    pub id: String,
    pub short_url: String,
    pub expire_at: Option<DateTime<Utc>>,
}
