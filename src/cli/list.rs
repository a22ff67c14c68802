use anyhow::{anyhow, Result};

use super::display::{print_note, print_note_list};
use super::outcome;
use crate::session::NoteSession;

/// Execute the list command
pub fn run_list(session: &mut NoteSession) -> Result<()> {
    let ok = session.list();
    outcome(session, ok)?;
    print_note_list(session.notes());
    Ok(())
}

/// Execute the show command
pub fn run_show(session: &mut NoteSession, id: &str) -> Result<()> {
    let ok = session.list();
    outcome(session, ok)?;

    let note = session
        .state()
        .find(id.trim())
        .ok_or_else(|| anyhow!("No note with id {}", id.trim()))?;
    print_note(note);
    Ok(())
}
