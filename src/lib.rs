/*!
 * # notesum - offline note summarization
 *
 * A Rust library that summarizes short notes on the device, without any
 * network service.
 *
 * ## Features
 *
 * - Lexical French/English language detection
 * - Deterministic extractive summarization
 * - Summary caching keyed by text and language:
 *   - in memory
 *   - in a SQLite database that survives restarts
 * - Note editing workflow that always attaches a local summary
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `language`: Language detection
 * - `summary`: Summarization:
 *   - `summary::extractive`: The extractive algorithm
 *   - `summary::cleanup`: Display cleanup of summaries
 *   - `summary::cache`: Cache keys, cache trait and in-memory cache
 *   - `summary::engine`: Cache-aware orchestration and async delivery
 * - `database`: SQLite-backed summary cache
 * - `notes`: Note records, note store interface and save workflow
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `text_utils`: Whitespace rules for note text
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod language;
pub mod notes;
pub mod summary;
pub mod text_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::SqliteSummaryCache;
pub use errors::{AppError, CacheError, NoteError, SummaryError};
pub use language::{LanguageTag, detect, detect_with_scores};
pub use notes::{NoteDraft, NoteEditor, NoteRecord, SaveRequest};
pub use summary::{SummaryEngine, clean_summary, extractive_summarize};
