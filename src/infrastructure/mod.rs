//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the collaborators the engine talks to.
//!
//! # Modules
//!
//! - [`cache`] - Volatile cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL durable store

pub mod cache;
pub mod persistence;
