/*!
 * Note editing layer.
 *
 * - `models`: drafts, records and search
 * - `gateway`: the note store interface and an in-memory store
 * - `editor`: the save workflow and dictation helpers
 */

pub mod editor;
pub mod gateway;
pub mod models;

pub use editor::{NoteEditor, SaveFailure, insert_dictation};
pub use gateway::{MemoryNoteGateway, NoteGateway};
pub use models::{NoteDraft, NoteId, NotePayload, NoteRecord, SaveRequest, filter_notes};
