//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::trail_service::TrailService`] - Cache-aside trail lookup, id allocation and creation

pub mod services;
