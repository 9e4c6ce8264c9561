//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgTrailRepository`] - Trail storage with atomic conditional inserts

pub mod pg_trail_repository;

pub use pg_trail_repository::PgTrailRepository;
