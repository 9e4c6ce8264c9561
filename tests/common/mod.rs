#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trails::application::services::{TrailPolicy, TrailService};
use trails::domain::entities::{ActiveTrail, NewTrail, Trail, TrailStats};
use trails::domain::error::TrailError;
use trails::domain::repositories::TrailRepository;
use trails::infrastructure::cache::{CacheError, CacheResult, CacheService};
use trails::state::AppState;
use trails::utils::trail_id::TrailIdGenerator;

pub const TEST_ID: &str = "testId";
pub const TEST_URL: &str = "https://test.com";
pub const GUIDE_ORIGIN: &str = "https://s.example.com";

/// In-memory store with the same atomicity as the PostgreSQL repository:
/// the existence check and the insert happen under one lock.
#[derive(Default)]
pub struct MemoryTrailRepository {
    rows: Mutex<HashMap<String, Trail>>,
    selects: AtomicUsize,
    inserts: AtomicUsize,
    forced_conflicts: AtomicUsize,
    unavailable: bool,
}

impl MemoryTrailRepository {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Makes the next `count` inserts report a conflict regardless of content.
    pub fn with_forced_conflicts(count: usize) -> Self {
        Self {
            forced_conflicts: AtomicUsize::new(count),
            ..Self::default()
        }
    }

    /// Writes a row directly, bypassing the conflict rules.
    pub fn insert_raw(&self, id: &str, url: &str, expire_at: Option<DateTime<Utc>>) {
        self.rows.lock().unwrap().insert(
            id.to_string(),
            Trail::new(id.to_string(), url.to_string(), expire_at, Utc::now()),
        );
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn select_calls(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), TrailError> {
        if self.unavailable {
            return Err(TrailError::StoreUnavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TrailRepository for MemoryTrailRepository {
    async fn select_active(&self, id: &str) -> Result<Option<ActiveTrail>, TrailError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let now = Utc::now();
        let rows = self.rows.lock().unwrap();

        Ok(rows
            .get(id)
            .filter(|t| !t.is_expired_at(now))
            .map(|t| ActiveTrail {
                url: t.url.clone(),
                expire_at: t.expire_at,
            }))
    }

    async fn insert_if_absent(&self, new_trail: NewTrail) -> Result<Option<Trail>, TrailError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let forced = self
            .forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if forced.is_ok() {
            return Ok(None);
        }

        let now = Utc::now();
        let mut rows = self.rows.lock().unwrap();

        if rows.get(&new_trail.id).is_some_and(|t| !t.is_expired_at(now)) {
            return Ok(None);
        }

        let trail = Trail::new(new_trail.id, new_trail.url, new_trail.expire_at, now);
        rows.insert(trail.id.clone(), trail.clone());

        Ok(Some(trail))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, TrailError> {
        self.check_available()?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|_, t| !t.is_expired_at(now));

        Ok((before - rows.len()) as u64)
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<TrailStats, TrailError> {
        self.check_available()?;

        let rows = self.rows.lock().unwrap();
        let expired = rows.values().filter(|t| t.is_expired_at(now)).count() as i64;

        Ok(TrailStats {
            active: rows.len() as i64 - expired,
            expired,
        })
    }

    async fn ping(&self) -> Result<(), TrailError> {
        self.check_available()
    }
}

/// Cache that records every write with its TTL.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    sets: Mutex<Vec<(String, String, u64)>>,
    broken: bool,
}

impl RecordingCache {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn put(&self, id: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(id.to_string(), url.to_string());
    }

    pub fn sets(&self) -> Vec<(String, String, u64)> {
        self.sets.lock().unwrap().clone()
    }

    /// Waits for background cache population to record `count` writes.
    pub async fn wait_for_sets(&self, count: usize) -> Vec<(String, String, u64)> {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.sets.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("cache was not populated in time");

        self.sets()
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get(&self, id: &str) -> CacheResult<Option<String>> {
        if self.broken {
            return Err(CacheError::ConnectionError("connection refused".into()));
        }
        Ok(self.entries.lock().unwrap().get(id).cloned())
    }

    async fn set_with_ttl(&self, id: &str, url: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.sets
            .lock()
            .unwrap()
            .push((id.to_string(), url.to_string(), ttl_seconds));

        if self.broken {
            return Err(CacheError::ConnectionError("connection refused".into()));
        }
        self.put(id, url);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.broken
    }
}

pub fn create_test_service(
    repo: Arc<MemoryTrailRepository>,
    cache: Arc<RecordingCache>,
) -> TrailService {
    TrailService::new(repo, cache, TrailPolicy::default())
}

pub fn create_test_state(
    repo: Arc<MemoryTrailRepository>,
    cache: Arc<RecordingCache>,
) -> AppState {
    let service = Arc::new(create_test_service(repo, cache.clone()));

    AppState::new(
        service,
        Arc::new(TrailIdGenerator::default()),
        cache,
        GUIDE_ORIGIN,
    )
}
