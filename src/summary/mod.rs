/*!
 * On-device note summarization.
 *
 * - `extractive`: the deterministic sentence selection algorithm
 * - `cache`: cache key derivation and the pluggable `SummaryCache`
 * - `engine`: the cached summarization entry point and async delivery
 * - `cleanup`: display cleanup of summaries
 */

// Re-export main types for easier usage
pub use self::cache::{CacheKey, MemorySummaryCache, SummaryCache};
pub use self::cleanup::clean_summary;
pub use self::engine::{SummaryEngine, SummaryStats, SummaryTask, fallback_summary};
pub use self::extractive::extractive_summarize;

// Submodules
pub mod cache;
pub mod cleanup;
pub mod engine;
pub mod extractive;
