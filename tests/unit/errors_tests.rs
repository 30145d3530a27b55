/*!
 * Tests for error types and conversions
 */

use std::error::Error;

use notesum::errors::{AppError, CacheError, NoteError, SummaryError};
use notesum::notes::SaveFailure;

#[test]
fn test_cacheError_unavailable_shouldDisplayCorrectly() {
    let error = CacheError::Unavailable("lock poisoned".to_string());
    let display = format!("{}", error);
    assert!(display.contains("unavailable"));
    assert!(display.contains("lock poisoned"));
}

#[test]
fn test_cacheError_fromRusqlite_shouldBecomeStorageError() {
    let error: CacheError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(error, CacheError::Storage(_)));
}

#[test]
fn test_summaryError_cancelled_shouldDisplayCorrectly() {
    assert_eq!(SummaryError::Cancelled.to_string(), "Summary generation was cancelled");
}

#[test]
fn test_noteError_variants_shouldMentionTheirCause() {
    assert!(NoteError::Validation("title is required".to_string())
        .to_string()
        .contains("title is required"));
    assert!(NoteError::NotFound("42".to_string()).to_string().contains("42"));
    assert!(NoteError::Offline("no route".to_string()).to_string().contains("offline"));
}

#[test]
fn test_appError_fromCacheError_shouldWrapIt() {
    let error: AppError = CacheError::Storage("disk full".to_string()).into();
    assert!(matches!(error, AppError::Cache(_)));
    assert!(error.to_string().contains("disk full"));
}

#[test]
fn test_appError_fromNoteError_shouldWrapIt() {
    let error: AppError = NoteError::Offline("down".to_string()).into();
    assert!(matches!(error, AppError::Note(NoteError::Offline(_))));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(msg) if msg.contains("conf.json")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(msg) if msg == "something odd"));
}

#[test]
fn test_saveFailure_shouldExposeNoteErrorAsSource() {
    let failure = SaveFailure {
        summary: Some("kept".to_string()),
        error: NoteError::Gateway("500".to_string()),
    };

    assert_eq!(failure.to_string(), "Note store error: 500");
    assert!(failure.source().is_some());
}
