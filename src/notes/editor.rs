/*!
 * Note editing workflow.
 *
 * Saving a note always attaches a summary computed on the device. The
 * summary comes from the engine's asynchronous task; if that task cannot
 * deliver, the plain extractive summary is used instead, so summarization
 * never prevents a save.
 */

use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::errors::NoteError;
use crate::notes::gateway::NoteGateway;
use crate::notes::models::{NoteId, NoteRecord, SaveRequest, filter_notes};
use crate::summary::{SummaryEngine, clean_summary, fallback_summary};
use crate::text_utils::is_blank;

/// A save the note store did not accept
///
/// Carries the summary that was computed before the store failed, so the
/// caller can show it or retry without summarizing again.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct SaveFailure {
    /// Summary computed for the draft, if the draft got that far
    pub summary: Option<String>,
    /// Why the save failed
    #[source]
    pub error: NoteError,
}

/// Editing session over a note store
pub struct NoteEditor {
    engine: SummaryEngine,
    gateway: Arc<dyn NoteGateway>,
    clean_output: bool,
}

impl NoteEditor {
    /// Create an editor; previews are cleaned unless `clean_output` is false
    pub fn new(engine: SummaryEngine, gateway: Arc<dyn NoteGateway>, clean_output: bool) -> Self {
        Self {
            engine,
            gateway,
            clean_output,
        }
    }

    /// The engine used to summarize notes
    pub fn engine(&self) -> &SummaryEngine {
        &self.engine
    }

    /// Save a draft as a new note or a new version of an existing one
    pub async fn save(&self, request: SaveRequest) -> Result<NoteRecord, SaveFailure> {
        let SaveRequest { draft, existing } = request;

        draft.validate().map_err(|error| SaveFailure {
            summary: None,
            error,
        })?;

        let summary = self.summarize(&draft.content).await;
        let payload = draft.with_summary(summary.clone());

        let result = match &existing {
            Some(id) => self.gateway.update_note(id, &payload).await,
            None => self.gateway.create_note(&payload).await,
        };

        match result {
            Ok(record) => {
                info!(
                    "{} note {}",
                    if existing.is_some() { "Updated" } else { "Created" },
                    record.id
                );
                Ok(record)
            }
            Err(error) => {
                warn!("Failed to save note: {}", error);
                Err(SaveFailure {
                    summary: Some(summary),
                    error,
                })
            }
        }
    }

    /// Summary of `content` as it should be displayed
    pub async fn preview_summary(&self, content: &str) -> Result<String, NoteError> {
        if is_blank(content) {
            return Err(NoteError::Validation("content is required".to_string()));
        }

        let summary = self.summarize(content).await;
        Ok(if self.clean_output {
            clean_summary(&summary)
        } else {
            summary
        })
    }

    /// Notes matching `query`, most recently updated first
    pub async fn search(&self, query: &str) -> Result<Vec<NoteRecord>, NoteError> {
        let notes = self.gateway.list_notes().await?;
        Ok(filter_notes(&notes, query))
    }

    /// Remove a note
    pub async fn delete(&self, id: &NoteId) -> Result<(), NoteError> {
        self.gateway.delete_note(id).await?;
        info!("Deleted note {}", id);
        Ok(())
    }

    async fn summarize(&self, content: &str) -> String {
        match self.engine.spawn(content).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary task failed, using the extractive fallback: {}", e);
                fallback_summary(content)
            }
        }
    }
}

/// Insert recognized speech into the note body
///
/// With a cursor (a char offset, clamped to the text) the speech is inserted
/// there; without one it is appended on a new line. Returns the new text and
/// the char offset just after the inserted speech.
pub fn insert_dictation(current: &str, cursor: Option<usize>, spoken: &str) -> (String, usize) {
    match cursor {
        Some(position) => {
            let position = position.min(current.chars().count());
            let byte_index = current
                .char_indices()
                .nth(position)
                .map(|(index, _)| index)
                .unwrap_or(current.len());

            let mut text = String::with_capacity(current.len() + spoken.len());
            text.push_str(&current[..byte_index]);
            text.push_str(spoken);
            text.push_str(&current[byte_index..]);

            (text, position + spoken.chars().count())
        }
        None => {
            let text = if current.is_empty() || spoken.is_empty() {
                format!("{}{}", current, spoken)
            } else {
                format!("{}\n{}", current, spoken)
            };
            let end = text.chars().count();
            (text, end)
        }
    }
}
