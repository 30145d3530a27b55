/*!
 * Database module for durable summary caching.
 *
 * This module provides SQLite-based persistence for computed summaries so
 * that a note is never summarized twice, even across restarts.
 */

pub mod connection;
pub mod schema;
pub mod store;

// Re-export main types
pub use connection::DatabaseConnection;
pub use store::{CacheStats, SqliteSummaryCache};
