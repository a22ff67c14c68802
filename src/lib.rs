pub mod api;
pub mod cli;
pub mod config;
pub mod dictation;
pub mod logging;
pub mod models;
pub mod session;

pub use api::{NotesApi, RemoteNotesApi, SyncError};
pub use session::NoteSession;
