use crate::models::{Note, NoteDraft};

/// Note currently open in the editor, with its unsaved values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: String,
    pub draft: NoteDraft,
}

/// The "new note" surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    pub open: bool,
    pub draft: NoteDraft,
}

/// Everything the client knows during one session.
///
/// `notes` mirrors the server collection as of the last successful
/// response. The remaining fields are transient UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub notes: Vec<Note>,
    /// True while a list request is in flight; starts true before the
    /// first one
    pub loading: bool,
    /// Last failure message; one slot shared by every operation
    pub error: Option<String>,
    pub editing: Option<EditState>,
    pub compose: ComposeState,
    /// Note awaiting delete confirmation
    pub pending_delete: Option<Note>,
    pub recording: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            loading: true,
            error: None,
            editing: None,
            compose: ComposeState::default(),
            pending_delete: None,
            recording: false,
        }
    }
}

impl SessionState {
    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.as_ref().is_some_and(|e| e.id == id)
    }
}
