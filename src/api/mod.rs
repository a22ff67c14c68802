//! Access to the remote notes service.
//!
//! The service is the only source of truth for notes. Everything the
//! session knows about the collection comes back through [`NotesApi`],
//! which keeps the HTTP transport swappable for tests.

mod error;
mod remote;
mod types;

pub use error::{ApiAction, SyncError};
pub use remote::RemoteNotesApi;
pub use types::{EnhanceResponse, HealthStatus, PopulateResponse};

use crate::models::{Note, NoteDraft};

pub type Result<T> = std::result::Result<T, SyncError>;

/// Operations the notes service offers on the collection
pub trait NotesApi: Send + Sync {
    /// Fetch the whole collection in server order
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Store a new note and return it with its assigned id and timestamp
    fn create_note(&self, draft: &NoteDraft) -> Result<Note>;

    /// Overwrite title and content of an existing note
    fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<Note>;

    fn delete_note(&self, id: &str) -> Result<()>;

    /// Ask the service for a rewritten version of a note's content.
    /// The stored note is not changed.
    fn enhance_note(&self, id: &str) -> Result<String>;
}
