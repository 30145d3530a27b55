/*!
 * Durable summary cache backed by SQLite.
 *
 * Entries survive process restarts and are scoped to the database file,
 * which by default lives in the user's local data directory.
 */

use log::debug;
use rusqlite::{OptionalExtension, params};
use std::fmt;
use std::path::Path;

use anyhow::Result;

use super::connection::DatabaseConnection;
use crate::errors::CacheError;
use crate::summary::cache::{CacheKey, SummaryCache};

/// Summary cache persisted in a SQLite database
#[derive(Clone)]
pub struct SqliteSummaryCache {
    db: DatabaseConnection,
}

impl SqliteSummaryCache {
    /// Create a cache on top of an open database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) the cache at the default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_default()?))
    }

    /// Open (or create) the cache at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path)?))
    }

    /// Create a cache with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Path of the underlying database
    pub fn path(&self) -> &Path {
        self.db.path()
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats, CacheError> {
        let (entries, total_hits) = self.db.execute(|conn| {
            let entries: i64 =
                conn.query_row("SELECT COUNT(*) FROM summary_cache", [], |row| row.get(0))?;
            let total_hits: i64 = conn.query_row(
                "SELECT COALESCE(SUM(hit_count), 0) FROM summary_cache",
                [],
                |row| row.get(0),
            )?;
            Ok((entries, total_hits))
        })?;

        Ok(CacheStats {
            entries,
            total_hits,
            file_size_bytes: self.db.file_size(),
        })
    }

    /// Remove every cached summary, returning how many were deleted
    pub fn clear(&self) -> Result<usize, CacheError> {
        let deleted = self
            .db
            .execute(|conn| Ok(conn.execute("DELETE FROM summary_cache", [])?))?;

        debug!("Cleared {} cached summaries", deleted);
        Ok(deleted)
    }
}

impl SummaryCache for SqliteSummaryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        self.db.execute(|conn| {
            let summary: Option<String> = conn
                .query_row(
                    "SELECT summary FROM summary_cache WHERE cache_key = ?1",
                    [key.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            if summary.is_some() {
                conn.execute(
                    "UPDATE summary_cache SET hit_count = hit_count + 1 WHERE cache_key = ?1",
                    [key.as_str()],
                )?;
            }

            Ok(summary)
        })
    }

    fn put(&self, key: &CacheKey, summary: &str) -> Result<(), CacheError> {
        let now = chrono::Utc::now().to_rfc3339();

        let inserted = self.db.execute(|conn| {
            Ok(conn.execute(
                r#"
                INSERT OR IGNORE INTO summary_cache (cache_key, summary, language, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![key.as_str(), summary, key.language().as_str(), now],
            )?)
        })?;

        if inserted > 0 {
            debug!("Stored summary {}", key);
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }

    fn len(&self) -> usize {
        self.db
            .execute(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM summary_cache", [], |row| row.get(0))?;
                Ok(count)
            })
            .map(|count| count as usize)
            .unwrap_or(0)
    }
}

/// Summary cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached summaries
    pub entries: i64,
    /// Number of lookups answered from the cache
    pub total_hits: i64,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cached summaries: {}, Hits: {}, Size: {} KB",
            self.entries,
            self.total_hits,
            self.file_size_bytes / 1024
        )
    }
}
