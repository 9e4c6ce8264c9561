//! Domain layer containing the trail model and store contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by the
//! infrastructure layer; the engine that drives them lives in
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - Trail records and creation input
//! - [`repositories`] - Durable store trait definitions
//! - [`error`] - Engine error taxonomy

pub mod entities;
pub mod error;
pub mod repositories;

pub use error::TrailError;
