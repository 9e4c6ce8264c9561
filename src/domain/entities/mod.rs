//! Core domain entities.
//!
//! - [`Trail`] - A persisted short id to URL mapping
//! - [`NewTrail`] - Input for creating a trail
//! - [`ActiveTrail`] - Lookup projection of a non-expired trail
//! - [`TrailStats`] - Active/expired row counts

pub mod trail;

pub use trail::{ActiveTrail, NewTrail, Trail, TrailStats};
