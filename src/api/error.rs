//! Error type shared by the API client, the session and dictation.

use reqwest::StatusCode;
use thiserror::Error;

/// Remote operation a failure belongs to, used to phrase messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    List,
    Create,
    Update,
    Delete,
    Enhance,
    Health,
    Populate,
}

impl std::fmt::Display for ApiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ApiAction::List => "fetch notes",
            ApiAction::Create => "create note",
            ApiAction::Update => "update note",
            ApiAction::Delete => "delete note",
            ApiAction::Enhance => "enhance note",
            ApiAction::Health => "check server health",
            ApiAction::Populate => "populate notes",
        };
        f.write_str(text)
    }
}

/// Every failure the client can surface. `Display` is the user-facing text.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Request could not be sent or the response could not be read
    #[error("Failed to {action}: {source}")]
    Transport {
        action: ApiAction,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Failed to {action} ({status}){}", detail_suffix(.detail))]
    Status {
        action: ApiAction,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Invalid API URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Title and content cannot both be empty")]
    EmptyDraft,

    #[error("No note with id {0}")]
    UnknownNote(String),

    #[error("Note {0} is not being edited")]
    NotEditing(String),

    #[error("Speech recognition is not supported on this system")]
    CapabilityUnavailable,

    #[error("{0}")]
    Recognition(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
}

impl SyncError {
    pub fn status(action: ApiAction, status: StatusCode) -> Self {
        SyncError::Status {
            action,
            status,
            detail: None,
        }
    }
}
