//! Errors raised by the lookup/creation engine.

use thiserror::Error;

/// Failure kinds surfaced by [`crate::application::services::TrailService`].
///
/// Cache failures never appear here: they are absorbed by the engine and
/// degrade to store-only operation.
#[derive(Debug, Error)]
pub enum TrailError {
    /// The conditional insert found the id already taken.
    #[error("trail id '{id}' is already taken")]
    IdConflict { id: String },

    /// Every candidate drawn from the generator was already in use.
    #[error("no free trail id found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// The durable store could not be reached or the query failed.
    #[error("trail store unavailable: {0}")]
    StoreUnavailable(String),
}

impl TrailError {
    /// Returns true for errors a caller can resolve by allocating a new id.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::IdConflict { .. })
    }
}
