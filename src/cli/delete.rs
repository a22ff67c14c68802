use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};

use super::display::note_summary;
use super::{outcome, ui};
use crate::session::NoteSession;

/// Execute the delete command
pub fn run_delete(session: &mut NoteSession, id: &str, force: bool) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    let ok = session.list();
    outcome(session, ok)?;
    let ok = session.request_delete(id);
    outcome(session, ok)?;

    confirm_and_delete(session, force)
}

/// Ask about the note awaiting deletion, then delete or cancel
pub(crate) fn confirm_and_delete(session: &mut NoteSession, force: bool) -> Result<()> {
    let Some(note) = session.state().pending_delete.clone() else {
        return Ok(());
    };

    if !force {
        println!("{}", note_summary(&note));
        if !io::stdin().is_terminal() {
            session.cancel_delete();
            return Err(anyhow!("Refusing to delete without confirmation. Use --force."));
        }
        let confirmed = ui::confirm("Delete? This cannot be undone.").unwrap_or(false);
        if !confirmed {
            session.cancel_delete();
            return Ok(());
        }
    }

    let ok = session.confirm_delete();
    outcome(session, ok)?;
    ui::status("Deleted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NotesApi, Result as ApiResult};
    use crate::models::{Note, NoteDraft};

    /// Service that must never be reached
    struct Unreachable;

    impl NotesApi for Unreachable {
        fn list_notes(&self) -> ApiResult<Vec<Note>> {
            panic!("unexpected request")
        }
        fn create_note(&self, _draft: &NoteDraft) -> ApiResult<Note> {
            panic!("unexpected request")
        }
        fn update_note(&self, _id: &str, _draft: &NoteDraft) -> ApiResult<Note> {
            panic!("unexpected request")
        }
        fn delete_note(&self, _id: &str) -> ApiResult<()> {
            panic!("unexpected request")
        }
        fn enhance_note(&self, _id: &str) -> ApiResult<String> {
            panic!("unexpected request")
        }
    }

    #[test]
    fn test_empty_identifier_error() {
        let mut session = NoteSession::new(Box::new(Unreachable));
        assert!(run_delete(&mut session, "   ", false).is_err());
    }

    #[test]
    fn test_nothing_pending_is_a_no_op() {
        let mut session = NoteSession::new(Box::new(Unreachable));
        assert!(confirm_and_delete(&mut session, true).is_ok());
    }
}
