//! PostgreSQL implementation of the trail repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::error;

use crate::domain::entities::{ActiveTrail, NewTrail, Trail, TrailStats};
use crate::domain::error::TrailError;
use crate::domain::repositories::TrailRepository;

/// PostgreSQL repository for trail storage and retrieval.
///
/// Expiry filtering uses the database clock (`now()`), so every service
/// instance agrees on which rows are active.
pub struct PgTrailRepository {
    pool: Arc<PgPool>,
}

impl PgTrailRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ActiveTrailRow {
    url: String,
    expire_at: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct TrailRow {
    id: String,
    url: String,
    expire_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct StatsRow {
    active: i64,
    expired: i64,
}

fn map_sqlx_error(e: sqlx::Error) -> TrailError {
    error!("Trail store error: {}", e);
    TrailError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl TrailRepository for PgTrailRepository {
    async fn select_active(&self, id: &str) -> Result<Option<ActiveTrail>, TrailError> {
        let row = sqlx::query_as::<_, ActiveTrailRow>(
            r#"
            SELECT url, expire_at
            FROM trails
            WHERE id = $1
              AND (expire_at > now() OR expire_at IS NULL)
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| ActiveTrail {
            url: r.url,
            expire_at: r.expire_at,
        }))
    }

    async fn insert_if_absent(&self, new_trail: NewTrail) -> Result<Option<Trail>, TrailError> {
        // An expired row is overwritten in place; an active one leaves the
        // statement without a returned row.
        let row = sqlx::query_as::<_, TrailRow>(
            r#"
            INSERT INTO trails (id, url, expire_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
                SET url = EXCLUDED.url,
                    expire_at = EXCLUDED.expire_at,
                    created_at = now()
                WHERE trails.expire_at IS NOT NULL
                  AND trails.expire_at <= now()
            RETURNING id, url, expire_at, created_at
            "#,
        )
        .bind(&new_trail.id)
        .bind(&new_trail.url)
        .bind(new_trail.expire_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| Trail::new(r.id, r.url, r.expire_at, r.created_at)))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TrailError> {
        let result = sqlx::query(
            "DELETE FROM trails WHERE expire_at IS NOT NULL AND expire_at <= $1",
        )
        .bind(now)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<TrailStats, TrailError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE expire_at IS NULL OR expire_at > $1) AS active,
                COUNT(*) FILTER (WHERE expire_at <= $1) AS expired
            FROM trails
            "#,
        )
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(TrailStats {
            active: row.active,
            expired: row.expired,
        })
    }

    async fn ping(&self) -> Result<(), TrailError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
