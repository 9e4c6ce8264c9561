//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod trail_repository;

pub use trail_repository::TrailRepository;

#[cfg(test)]
pub use trail_repository::MockTrailRepository;
