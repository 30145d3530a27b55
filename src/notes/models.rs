/*!
 * Note records and drafts.
 *
 * Records are values: editing a note produces a new record instead of
 * mutating a shared one.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::NoteError;
use crate::text_utils::{is_blank, trim_text};

/// Identifier of a note in the note store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an identifier handed out by the note store
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form of the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user typed (or dictated) in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
}

impl NoteDraft {
    /// Create a draft; surrounding whitespace is dropped
    pub fn new(title: impl AsRef<str>, content: impl AsRef<str>) -> Self {
        Self {
            title: trim_text(title.as_ref()).to_string(),
            content: trim_text(content.as_ref()).to_string(),
        }
    }

    /// Check that the draft can be saved
    pub fn validate(&self) -> Result<(), NoteError> {
        validate_fields(&self.title, &self.content)
    }

    /// Attach a summary, producing what is sent to the note store
    pub fn with_summary(&self, summary: impl Into<String>) -> NotePayload {
        NotePayload {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: summary.into(),
        }
    }
}

/// Body of a create or update request to the note store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Summary computed on the device
    pub summary: String,
}

impl NotePayload {
    /// Check that the payload can be stored
    pub fn validate(&self) -> Result<(), NoteError> {
        validate_fields(&self.title, &self.content)
    }
}

/// Title and content are both required
fn validate_fields(title: &str, content: &str) -> Result<(), NoteError> {
    if is_blank(title) {
        return Err(NoteError::Validation("title is required".to_string()));
    }
    if is_blank(content) {
        return Err(NoteError::Validation("content is required".to_string()));
    }
    Ok(())
}

/// A saved note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Identifier in the note store
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Summary of the body
    #[serde(default)]
    pub summary: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl NoteRecord {
    /// Build a brand new record
    pub fn create(id: NoteId, payload: &NotePayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title.clone(),
            content: payload.content.clone(),
            summary: payload.summary.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the next version of this record
    ///
    /// The identifier and creation time carry over.
    pub fn revise(&self, payload: &NotePayload, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            title: payload.title.clone(),
            content: payload.content.clone(),
            summary: payload.summary.clone(),
            created_at: self.created_at,
            updated_at: now,
        }
    }

    /// Whether the note matches a lowercase search query
    fn matches(&self, lowered_query: &str) -> bool {
        [&self.title, &self.content, &self.summary]
            .iter()
            .any(|field| field.to_lowercase().contains(lowered_query))
    }
}

/// Keep the notes whose title, content or summary contain `query`,
/// ignoring case; an empty query keeps everything
pub fn filter_notes(notes: &[NoteRecord], query: &str) -> Vec<NoteRecord> {
    let lowered = trim_text(query).to_lowercase();
    if lowered.is_empty() {
        return notes.to_vec();
    }

    notes
        .iter()
        .filter(|note| note.matches(&lowered))
        .cloned()
        .collect()
}

/// Desired state of a note: a new one, or a new version of an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// What the note should contain
    pub draft: NoteDraft,
    /// Note being edited, if any
    pub existing: Option<NoteId>,
}

impl SaveRequest {
    /// Request the creation of a new note
    pub fn create(draft: NoteDraft) -> Self {
        Self {
            draft,
            existing: None,
        }
    }

    /// Request an update of an existing note
    pub fn update(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            draft,
            existing: Some(id),
        }
    }
}
