/*!
 * Summary caching.
 *
 * This module defines the cache key derivation, the `SummaryCache` trait
 * every backend implements, and an in-memory backend. The durable SQLite
 * backend lives in `crate::database`.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::errors::CacheError;
use crate::language::LanguageTag;
use crate::text_utils::trim_text;

/// Cache key derived from the trimmed note text and its detected language
///
/// Rendered as `{hash:016x}_{language}`, where the hash is the first eight
/// bytes of the SHA-256 of the trimmed text. Stable across runs and
/// platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    value: String,
    language: LanguageTag,
}

impl CacheKey {
    /// Derive the key for a text and the language detected for it
    pub fn derive(text: &str, language: LanguageTag) -> Self {
        let digest = Sha256::digest(trim_text(text).as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);

        Self {
            value: format!("{:016x}_{}", u64::from_be_bytes(prefix), language),
            language,
        }
    }

    /// String form of the key, as stored by backends
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Language the key was derived with
    pub fn language(&self) -> LanguageTag {
        self.language
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Pluggable key-value store for computed summaries
///
/// Entries are write-once: a `put` for a key that already holds a value is
/// ignored, since the summary of a given text never changes. Backends must
/// be safe to share between threads; concurrent writes of the same key are
/// harmless because they carry the same value.
pub trait SummaryCache: Send + Sync {
    /// Look up a summary. `Ok(None)` is a miss.
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store a summary unless the key is already present
    fn put(&self, key: &CacheKey, summary: &str) -> Result<(), CacheError>;

    /// Human-readable backend name (for logging)
    fn name(&self) -> &str;

    /// Number of stored entries (0 if unknown)
    fn len(&self) -> usize;

    /// Whether the cache holds no entry
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process summary cache
///
/// Clones share the same storage.
#[derive(Clone)]
pub struct MemorySummaryCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<String, String>>>,

    /// Number of entries actually written
    writes: Arc<RwLock<usize>>,

    /// Whether caching is enabled
    enabled: bool,
}

impl MemorySummaryCache {
    /// Create a new in-memory cache
    ///
    /// A disabled cache misses on every lookup and drops every write.
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Number of writes that created an entry
    pub fn writes(&self) -> usize {
        *self.writes.read()
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.entries.write().clear();
        *self.writes.write() = 0;

        debug!("Summary cache cleared");
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MemorySummaryCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SummaryCache for MemorySummaryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        if !self.enabled {
            return Ok(None);
        }

        Ok(self.entries.read().get(key.as_str()).cloned())
    }

    fn put(&self, key: &CacheKey, summary: &str) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let mut entries = self.entries.write();
        if entries.contains_key(key.as_str()) {
            return Ok(());
        }

        entries.insert(key.as_str().to_string(), summary.to_string());
        *self.writes.write() += 1;

        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
