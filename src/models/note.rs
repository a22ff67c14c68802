use serde::{Deserialize, Serialize};

/// A note as stored by the remote notes service.
///
/// Timestamps are kept exactly as the server sent them so that the local
/// copy compares equal to the server payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    /// Only present once the note has been edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Note {
    /// True once the server has recorded at least one edit
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// Unsaved title/content pair used while composing or editing a note.
///
/// Serializes to the `{title, content}` body the create and update
/// endpoints expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Seed a draft from the current values of a note
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    /// Both fields are empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Append dictated text to the content, space separated
    pub fn append_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.content.is_empty() && !self.content.ends_with(char::is_whitespace) {
            self.content.push(' ');
        }
        self.content.push_str(transcript);
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}
