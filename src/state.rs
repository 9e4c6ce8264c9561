//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::TrailService;
use crate::infrastructure::cache::CacheService;
use crate::utils::trail_id::TrailIdGenerator;

#[derive(Clone)]
pub struct AppState {
    pub trail_service: Arc<TrailService>,
    pub id_generator: Arc<TrailIdGenerator>,
    pub cache: Arc<dyn CacheService>,
    /// Public origin short URLs are built from, without trailing slash.
    pub guide_origin: String,
}

impl AppState {
    pub fn new(
        trail_service: Arc<TrailService>,
        id_generator: Arc<TrailIdGenerator>,
        cache: Arc<dyn CacheService>,
        guide_origin: impl Into<String>,
    ) -> Self {
        Self {
            trail_service,
            id_generator,
            cache,
            guide_origin: guide_origin.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the public short URL for `id`.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.guide_origin, id)
    }
}
