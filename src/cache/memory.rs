//! In-process cache backend

use crate::cache::{CacheEntry, CacheResult, CacheStore};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A `HashMap` guarded by a mutex, optionally bounded in size
///
/// When a bounded cache is full, expired entries are purged first and then the
/// oldest entry is evicted to make room.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: Option<usize>,
}

impl MemoryCache {
    /// Creates an unbounded cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `max_entries` entries
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries: Some(max_entries.max(1)),
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry and returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut entries = self.lock();

        if let Some(max) = self.max_entries {
            if !entries.contains_key(key) && entries.len() >= max {
                entries.retain(|_, entry| !entry.is_expired());
            }
            if !entries.contains_key(key) && entries.len() >= max {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.created_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::trace!("Evicting cache entry: {}", oldest);
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }
}
