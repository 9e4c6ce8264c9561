//! Repository trait for trail data access.

use crate::domain::entities::{ActiveTrail, NewTrail, Trail, TrailStats};
use crate::domain::error::TrailError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable store interface for trails.
///
/// Implementations are shared between many engine instances and must be
/// safe under arbitrary interleavings; uniqueness of `id` is enforced here,
/// not by callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTrailRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrailRepository: Send + Sync {
    /// Finds the trail for `id` if it is still active.
    ///
    /// A row is active when `expire_at` is null or strictly after the current
    /// time. Expired rows are reported as `None`, exactly like missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::StoreUnavailable`] on database errors.
    async fn select_active(&self, id: &str) -> Result<Option<ActiveTrail>, TrailError>;

    /// Atomically inserts `new_trail` unless an active row already holds its id.
    ///
    /// Returns the persisted row (with store defaults such as `created_at`)
    /// only when the insert took effect, and `None` on conflict. A row whose
    /// expiry has passed does not block the insert; it is replaced in the
    /// same statement.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::StoreUnavailable`] on database errors.
    async fn insert_if_absent(&self, new_trail: NewTrail) -> Result<Option<Trail>, TrailError>;

    /// Deletes rows whose `expire_at` is at or before `now`.
    ///
    /// Returns the number of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::StoreUnavailable`] on database errors.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TrailError>;

    /// Counts active and expired rows relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::StoreUnavailable`] on database errors.
    async fn stats(&self, now: DateTime<Utc>) -> Result<TrailStats, TrailError>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> Result<(), TrailError>;
}
