//! Cache-aside lookup and creation engine for trails.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewTrail, Trail, TrailStats};
use crate::domain::error::TrailError;
use crate::domain::repositories::TrailRepository;
use crate::infrastructure::cache::CacheService;

/// Default cache TTL for trails without an expiry.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 10;

/// Default upper bound on generator draws per allocation.
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: usize = 16;

/// Per-engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailPolicy {
    /// Cache TTL applied to trails that never expire.
    pub default_cache_ttl_seconds: u64,
    /// Maximum number of candidate ids drawn by [`TrailService::allocate`].
    pub max_allocation_attempts: usize,
}

impl Default for TrailPolicy {
    fn default() -> Self {
        Self {
            default_cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            max_allocation_attempts: DEFAULT_MAX_ALLOCATION_ATTEMPTS,
        }
    }
}

/// Derives the cache TTL for a trail.
///
/// Trails with an expiry are cached until that expiry, rounded to the nearest
/// second; others get `default_ttl`. Returns `None` when the expiry is less
/// than half a second away, in which case the trail should not be cached.
pub fn cache_ttl_seconds(
    expire_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    default_ttl: u64,
) -> Option<u64> {
    match expire_at {
        None => Some(default_ttl),
        Some(expire_at) => {
            let millis = (expire_at - now).num_milliseconds();
            let seconds = (millis + 500).div_euclid(1000);
            u64::try_from(seconds).ok().filter(|s| *s > 0)
        }
    }
}

/// The lookup/creation engine.
///
/// Reconciles the volatile cache with the durable store:
///
/// - **Lookup**: cache first, store on miss, then repopulate the cache
/// - **Allocation**: draw random ids until one is free, probing via lookup
/// - **Creation**: atomic conditional insert, then populate the cache
///
/// The engine keeps no mutable state between calls; any number of instances
/// may share the same cache and store.
pub struct TrailService {
    repository: Arc<dyn TrailRepository>,
    cache: Arc<dyn CacheService>,
    policy: TrailPolicy,
}

impl TrailService {
    /// Creates a new engine over the given store and cache.
    pub fn new(
        repository: Arc<dyn TrailRepository>,
        cache: Arc<dyn CacheService>,
        policy: TrailPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    /// Returns the policy this engine was built with.
    pub fn policy(&self) -> &TrailPolicy {
        &self.policy
    }

    /// Resolves `id` to its target URL.
    ///
    /// A cache hit returns without touching the store. On a miss the store is
    /// queried for an active row and, if found, the cache is repopulated in
    /// the background. Cache read failures are treated as misses.
    ///
    /// Returns `Ok(None)` when the id never existed or has expired.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::StoreUnavailable`] if the store query fails.
    pub async fn lookup(&self, id: &str) -> Result<Option<String>, TrailError> {
        match self.cache.get(id).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {}", id);
                counter!("trails_cache_hits_total").increment(1);
                return Ok(Some(url));
            }
            Ok(None) => {
                debug!("Cache MISS: {}", id);
                counter!("trails_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!("Cache read failed for {}, falling back to store: {}", id, e);
                counter!("trails_cache_errors_total").increment(1);
            }
        }

        let Some(active) = self.repository.select_active(id).await? else {
            return Ok(None);
        };

        self.populate_cache(id, &active.url, active.expire_at);

        Ok(Some(active.url))
    }

    /// Draws ids from `generator` until one is not in use.
    ///
    /// Each candidate is probed through [`Self::lookup`]. The loop yields to
    /// the scheduler between draws and gives up after
    /// [`TrailPolicy::max_allocation_attempts`].
    ///
    /// The returned id can still be claimed by a concurrent caller before it
    /// is inserted; [`Self::create`] reports that as [`TrailError::IdConflict`].
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::AllocationExhausted`] when every draw collided and
    /// [`TrailError::StoreUnavailable`] if a probe fails.
    pub async fn allocate<G>(&self, mut generator: G) -> Result<String, TrailError>
    where
        G: FnMut() -> String + Send,
    {
        let attempts = self.policy.max_allocation_attempts;

        for attempt in 1..=attempts {
            let candidate = generator();

            if self.lookup(&candidate).await?.is_none() {
                return Ok(candidate);
            }

            debug!("Trail id {} taken (attempt {}/{})", candidate, attempt, attempts);
            counter!("trails_id_collisions_total").increment(1);
            tokio::task::yield_now().await;
        }

        warn!("Trail id allocation exhausted after {} attempts", attempts);
        Err(TrailError::AllocationExhausted { attempts })
    }

    /// Persists a new trail and warms the cache with it.
    ///
    /// The insert is a single conditional statement, so of several concurrent
    /// calls for the same id exactly one succeeds. The engine does not retry
    /// on conflict.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::IdConflict`] if the id is held by an active trail
    /// and [`TrailError::StoreUnavailable`] on database errors.
    pub async fn create(&self, new_trail: NewTrail) -> Result<Trail, TrailError> {
        let id = new_trail.id.clone();

        let Some(trail) = self.repository.insert_if_absent(new_trail).await? else {
            warn!("Trail id conflict: {}", id);
            counter!("trails_id_conflicts_total").increment(1);
            return Err(TrailError::IdConflict { id });
        };

        info!("Trail created: {} (expire_at: {:?})", trail.id, trail.expire_at);
        counter!("trails_created_total").increment(1);

        self.populate_cache(&trail.id, &trail.url, trail.expire_at);

        Ok(trail)
    }

    /// Allocates a free id and creates a trail under it.
    ///
    /// Callers that want to survive races wrap this in their own retry loop
    /// keyed on [`TrailError::is_conflict`].
    ///
    /// # Errors
    ///
    /// See [`Self::allocate`] and [`Self::create`].
    pub async fn allocate_and_create<G>(
        &self,
        generator: G,
        url: String,
        expire_at: Option<DateTime<Utc>>,
    ) -> Result<Trail, TrailError>
    where
        G: FnMut() -> String + Send,
    {
        let id = self.allocate(generator).await?;

        self.create(NewTrail { id, url, expire_at }).await
    }

    /// Deletes expired rows from the store.
    ///
    /// Expired rows are already invisible to lookups; this only reclaims space.
    pub async fn purge_expired(&self) -> Result<u64, TrailError> {
        let deleted = self.repository.delete_expired(Utc::now()).await?;
        info!("Purged {} expired trails", deleted);
        Ok(deleted)
    }

    /// Returns active/expired row counts.
    pub async fn stats(&self) -> Result<TrailStats, TrailError> {
        self.repository.stats(Utc::now()).await
    }

    /// Checks store connectivity.
    pub async fn check_store(&self) -> Result<(), TrailError> {
        self.repository.ping().await
    }

    /// Writes `(id, url)` to the cache without blocking the caller.
    fn populate_cache(&self, id: &str, url: &str, expire_at: Option<DateTime<Utc>>) {
        let Some(ttl) =
            cache_ttl_seconds(expire_at, Utc::now(), self.policy.default_cache_ttl_seconds)
        else {
            debug!("Trail {} expires too soon to cache", id);
            return;
        };

        let cache = Arc::clone(&self.cache);
        let id = id.to_owned();
        let url = url.to_owned();

        tokio::spawn(async move {
            if let Err(e) = cache.set_with_ttl(&id, &url, ttl).await {
                warn!("Failed to cache trail {}: {}", id, e);
            }
        });
    }
}
