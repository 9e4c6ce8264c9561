//! API route configuration.

use crate::api::handlers::create_trail_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Versioned API routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /create_trail` - Allocate an id and create a trail
pub fn v1_routes() -> Router<AppState> {
    Router::new().route("/create_trail", post(create_trail_handler))
}
