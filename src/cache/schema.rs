//! SQL schema for the on-disk cache

/// SQL schema for the cache database
pub const SCHEMA_SQL: &str = r#"
-- One row per cache key; re-setting a key replaces the row
CREATE TABLE IF NOT EXISTS cache_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    created_at TEXT NOT NULL,
    ttl_ms INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cache_entries_created ON cache_entries(created_at);
"#;

/// Initializes the cache schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
