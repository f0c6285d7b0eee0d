//! SQLite cache backend
//!
//! Keeps cached pages (and the bootstrapped login cookie) across restarts.

use crate::cache::schema::initialize_schema;
use crate::cache::{CacheEntry, CacheError, CacheResult, CacheStore};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// SQLite-backed cache
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Opens (or creates) a cache database at `path`
    pub fn open(path: &Path) -> CacheResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Deletes every expired row and returns how many were removed
    pub fn purge_expired(&self) -> CacheResult<usize> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT key, value, created_at, ttl_ms FROM cache_entries")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut removed = 0;
        for (key, value, created_at, ttl_ms) in rows {
            let expired = decode_entry(&key, value, &created_at, ttl_ms)
                .map(|entry| entry.is_expired())
                .unwrap_or(true);
            if expired {
                removed += conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?;
            }
        }

        Ok(removed)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for SqliteCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT value, created_at, ttl_ms FROM cache_entries WHERE key = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((value, created_at, ttl_ms)) = row else {
            return Ok(None);
        };

        let entry = match decode_entry(key, value, &created_at, ttl_ms) {
            Ok(entry) => entry,
            Err(e) => {
                conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?;
                return Err(e);
            }
        };

        if entry.is_expired() {
            conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.lock().execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, created_at, ttl_ms) VALUES (?1, ?2, ?3, ?4)",
            params![key, value, Utc::now().to_rfc3339(), ttl_ms],
        )?;
        Ok(())
    }
}

fn decode_entry(key: &str, value: String, created_at: &str, ttl_ms: i64) -> CacheResult<CacheEntry> {
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|e| CacheError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?
        .with_timezone(&Utc);

    Ok(CacheEntry {
        value,
        created_at,
        ttl: Duration::from_millis(u64::try_from(ttl_ms).unwrap_or(0)),
    })
}
