/*!
 * Summary engine.
 *
 * Orchestrates a summarization: detect the language, derive the cache key,
 * consult the cache and run the extractive algorithm on a miss. The engine
 * never fails; a broken cache only costs a recomputation.
 */

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use log::{debug, warn};
use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::errors::SummaryError;
use crate::language::detect;
use crate::summary::cache::{CacheKey, MemorySummaryCache, SummaryCache};
use crate::summary::extractive::extractive_summarize;
use crate::text_utils::trim_text;

/// Counters describing how an engine has been serving requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryStats {
    /// Lookups answered by the cache
    pub hits: usize,
    /// Lookups the cache could not answer
    pub misses: usize,
    /// Runs of the extractive algorithm
    pub computations: usize,
    /// Cache reads or writes that failed
    pub cache_errors: usize,
}

impl SummaryStats {
    /// Share of lookups answered by the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Summarizes note text, reusing previously computed summaries
///
/// The cache is injected at construction. Clones share the cache and the
/// statistics, so an engine can be handed to worker tasks freely.
#[derive(Clone)]
pub struct SummaryEngine {
    cache: Arc<dyn SummaryCache>,
    stats: Arc<RwLock<SummaryStats>>,
}

impl SummaryEngine {
    /// Create an engine backed by the given cache
    pub fn new(cache: Arc<dyn SummaryCache>) -> Self {
        Self {
            cache,
            stats: Arc::new(RwLock::new(SummaryStats::default())),
        }
    }

    /// Create an engine backed by a fresh in-memory cache
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySummaryCache::default()))
    }

    /// The cache this engine reads and writes
    pub fn cache(&self) -> &Arc<dyn SummaryCache> {
        &self.cache
    }

    /// Current statistics
    pub fn stats(&self) -> SummaryStats {
        *self.stats.read()
    }

    /// Summarize a note
    ///
    /// Empty or whitespace-only text yields an empty summary without touching
    /// the cache. Otherwise the summary is served from the cache when present
    /// and computed then stored when not.
    pub fn summarize(&self, text: &str) -> String {
        let trimmed = trim_text(text);
        if trimmed.is_empty() {
            return String::new();
        }

        let language = detect(trimmed);
        let key = CacheKey::derive(trimmed, language);

        let cache_available = match self.cache.get(&key) {
            Ok(Some(summary)) => {
                self.stats.write().hits += 1;
                debug!("Summary cache hit for '{}' ({})", truncate_text(trimmed, 30), key);
                return summary;
            }
            Ok(None) => {
                self.stats.write().misses += 1;
                debug!("Summary cache miss for '{}' ({})", truncate_text(trimmed, 30), key);
                true
            }
            Err(e) => {
                let mut stats = self.stats.write();
                stats.misses += 1;
                stats.cache_errors += 1;
                warn!("Summary cache '{}' unavailable, summarizing without it: {}", self.cache.name(), e);
                false
            }
        };

        let summary = extractive_summarize(trimmed);
        self.stats.write().computations += 1;

        if cache_available {
            if let Err(e) = self.cache.put(&key, &summary) {
                self.stats.write().cache_errors += 1;
                warn!("Failed to store summary {} in '{}': {}", key, self.cache.name(), e);
            }
        }

        summary
    }

    /// Summarize a note on tokio's blocking pool
    ///
    /// Must be called from within a tokio runtime. The returned task resolves
    /// exactly once; dropping it abandons the call and discards the result.
    pub fn spawn(&self, text: impl Into<String>) -> SummaryTask {
        let engine = self.clone();
        let text = text.into();

        SummaryTask {
            handle: tokio::task::spawn_blocking(move || engine.summarize(&text)),
        }
    }
}

/// Summary being computed off the caller's thread
///
/// Resolves to the summary, or to a `SummaryError` when the task was
/// cancelled or its worker died. Results of abandoned tasks are discarded.
#[derive(Debug)]
pub struct SummaryTask {
    handle: JoinHandle<String>,
}

impl SummaryTask {
    /// Abandon the task
    ///
    /// A summarization that already started still runs to completion, but
    /// its result is never delivered to anyone who stopped waiting.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the summary is ready to be collected
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for SummaryTask {
    type Output = Result<String, SummaryError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|result| {
            result.map_err(|e| {
                if e.is_cancelled() {
                    SummaryError::Cancelled
                } else {
                    SummaryError::Worker(e.to_string())
                }
            })
        })
    }
}

/// Summary used when the engine cannot deliver one: the extractive
/// algorithm on the trimmed text, with no cache involved
pub fn fallback_summary(text: &str) -> String {
    extractive_summarize(trim_text(text))
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
