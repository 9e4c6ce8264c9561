//! Trail entity representing a short id to URL mapping.

use chrono::{DateTime, Utc};

/// A persisted trail as confirmed by the store.
///
/// Trails are immutable once created. A trail with `expire_at = None` never
/// expires at the store level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    pub id: String,
    pub url: String,
    pub expire_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Trail {
    /// Creates a new Trail instance.
    pub fn new(
        id: String,
        url: String,
        expire_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            expire_at,
            created_at,
        }
    }

    /// Returns true once `expire_at` is at or before `now`.
    ///
    /// In-process view of a loaded row only. The PostgreSQL store evaluates
    /// expiry itself against the database clock.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|e| e <= now)
    }
}

/// Input data for creating a new trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrail {
    pub id: String,
    pub url: String,
    pub expire_at: Option<DateTime<Utc>>,
}

/// The part of a trail a lookup needs: target and expiry.
///
/// Only returned for rows that are not expired at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTrail {
    pub url: String,
    pub expire_at: Option<DateTime<Utc>>,
}

/// Row counts split by expiry state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailStats {
    pub active: i64,
    pub expired: i64,
}
