//! Page cache
//!
//! This module defines the `CacheStore` capability used to memoize fetched
//! pages and the bootstrapped login cookie, together with two backends:
//! - `MemoryCache`: bounded in-process map
//! - `SqliteCache`: on-disk store shared across restarts
//!
//! Entries carry a fixed time-to-live and are never returned once expired.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by cache backends
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt cache entry for {key}: {message}")]
    Corrupt { key: String, message: String },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// A key/value store with per-entry expiry
///
/// Implementations must be safe to share between concurrent requests. They are
/// not required to serialize duplicate computations for the same key.
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent or expired
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous entry
    fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}

/// A stored value together with its lifetime
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(value: impl Into<String>, ttl: Duration) -> Self {
        Self {
            value: value.into(),
            created_at: Utc::now(),
            ttl,
        }
    }

    /// Returns how long ago the entry was stored
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at).to_std().unwrap_or_default()
    }

    /// Checks if the entry has outlived its time-to-live
    pub fn is_expired(&self) -> bool {
        self.age() >= self.ttl
    }
}

/// Returns the cached value for `key`, or computes, stores and returns it
///
/// A failing `producer` is never memoized. Backend failures are logged and
/// treated as a miss (on read) or skipped (on write), so a broken cache
/// degrades to uncached fetching instead of failing the request.
pub async fn get_or_compute<F, Fut, E>(
    store: &dyn CacheStore,
    key: &str,
    ttl: Duration,
    producer: F,
) -> Result<String, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, E>>,
{
    match store.get(key) {
        Ok(Some(value)) => {
            tracing::debug!("Cache hit: {}", key);
            return Ok(value);
        }
        Ok(None) => tracing::debug!("Cache miss: {}", key),
        Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
    }

    let value = producer().await?;

    if let Err(e) = store.set(key, &value, ttl) {
        tracing::warn!("Cache write failed for {}: {}", key, e);
    }

    Ok(value)
}
