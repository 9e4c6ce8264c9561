//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value cache with per-key expiry, keyed by trail id.
///
/// Implementations report failures honestly; it is the engine that treats a
/// failed read as a miss and a failed write as a no-op. Entries are always a
/// time-bounded copy of store truth and may vanish at any moment.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached URL for `id`, or `None` on a miss.
    async fn get(&self, id: &str) -> CacheResult<Option<String>>;

    /// Stores `url` under `id`, expiring after `ttl_seconds`.
    ///
    /// `ttl_seconds` is always at least 1.
    async fn set_with_ttl(&self, id: &str, url: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
