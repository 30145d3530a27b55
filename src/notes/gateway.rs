/*!
 * Interface to the note store.
 *
 * The real store is a remote service reached over HTTP; this module only
 * defines what the editing layer needs from it, plus an in-process
 * implementation used by the CLI and the tests.
 */

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::NoteError;
use crate::notes::models::{NoteId, NotePayload, NoteRecord};

/// Operations the note store offers
#[async_trait]
pub trait NoteGateway: Send + Sync {
    /// All notes, most recently updated first
    async fn list_notes(&self) -> Result<Vec<NoteRecord>, NoteError>;

    /// A single note
    async fn get_note(&self, id: &NoteId) -> Result<NoteRecord, NoteError>;

    /// Store a new note and return it as saved
    async fn create_note(&self, payload: &NotePayload) -> Result<NoteRecord, NoteError>;

    /// Replace the contents of an existing note and return it as saved
    async fn update_note(&self, id: &NoteId, payload: &NotePayload) -> Result<NoteRecord, NoteError>;

    /// Remove a note
    async fn delete_note(&self, id: &NoteId) -> Result<(), NoteError>;
}

/// Note store kept in process memory
///
/// Clones share the same notes. The gateway can be switched offline to
/// reproduce transport failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteGateway {
    notes: Arc<RwLock<HashMap<NoteId, NoteRecord>>>,
    offline: Arc<AtomicBool>,
    request_count: Arc<AtomicUsize>,
}

impl MemoryNoteGateway {
    /// Create an empty, online store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the connection to the store
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of requests received, including rejected ones
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of stored notes
    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    /// Whether the store holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    fn begin_request(&self, operation: &str) -> Result<(), NoteError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(NoteError::Offline(format!("cannot {} while offline", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteGateway for MemoryNoteGateway {
    async fn list_notes(&self) -> Result<Vec<NoteRecord>, NoteError> {
        self.begin_request("list notes")?;

        let mut notes: Vec<NoteRecord> = self.notes.read().values().cloned().collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    async fn get_note(&self, id: &NoteId) -> Result<NoteRecord, NoteError> {
        self.begin_request("fetch note")?;

        self.notes
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }

    async fn create_note(&self, payload: &NotePayload) -> Result<NoteRecord, NoteError> {
        self.begin_request("create note")?;
        payload.validate()?;

        let record = NoteRecord::create(NoteId::generate(), payload, Utc::now());
        self.notes.write().insert(record.id.clone(), record.clone());

        debug!("Created note {}", record.id);
        Ok(record)
    }

    async fn update_note(&self, id: &NoteId, payload: &NotePayload) -> Result<NoteRecord, NoteError> {
        self.begin_request("update note")?;
        payload.validate()?;

        let mut notes = self.notes.write();
        let current = notes
            .get(id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;

        let revised = current.revise(payload, Utc::now());
        notes.insert(id.clone(), revised.clone());

        debug!("Updated note {}", id);
        Ok(revised)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), NoteError> {
        self.begin_request("delete note")?;

        match self.notes.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(NoteError::NotFound(id.to_string())),
        }
    }
}
