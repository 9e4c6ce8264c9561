//! Business logic services for the application layer.

pub mod trail_service;

pub use trail_service::{TrailPolicy, TrailService, cache_ttl_seconds};
