/*!
 * Error types for the notesum crate.
 *
 * This module contains custom error types for the different parts of the
 * summarization core and the note editing layer, using the thiserror crate
 * for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by a summary cache backend
///
/// The summary engine never propagates these: a failing cache degrades to
/// "always compute, never persist".
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store cannot be reached (lock poisoned, file missing...)
    #[error("Summary cache unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected a read or a write
    #[error("Summary cache storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

/// Errors that can occur when a summary is delivered asynchronously
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The caller abandoned the task before the summary was delivered
    #[error("Summary generation was cancelled")]
    Cancelled,

    /// The worker running the summarization stopped abnormally
    #[error("Summary worker failed: {0}")]
    Worker(String),
}

/// Errors that can occur when working with notes and the note store
#[derive(Error, Debug)]
pub enum NoteError {
    /// The draft is missing a required field
    #[error("Invalid note: {0}")]
    Validation(String),

    /// No note exists with the given identifier
    #[error("Note not found: {0}")]
    NotFound(String),

    /// The note store cannot be reached
    #[error("Note store offline: {0}")]
    Offline(String),

    /// The note store answered with an error
    #[error("Note store error: {0}")]
    Gateway(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a summary cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from asynchronous summarization
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Error from the note layer
    #[error("Note error: {0}")]
    Note(#[from] NoteError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
