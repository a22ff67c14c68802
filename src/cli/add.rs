use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};
use std::time::Duration;

use super::display::print_draft;
use super::{outcome, ui};
use crate::session::NoteSession;

/// How long to wait for the recognizer to flush after a stop
const DICTATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Execute the add command
pub fn run_add(
    session: &mut NoteSession,
    title: Option<String>,
    content: Option<String>,
    dictate: bool,
) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let all_none = title.is_none() && content.is_none();

    if all_none && !dictate && !interactive {
        return Err(anyhow!(
            "Nothing to add. Pass --title/--content or run in a terminal."
        ));
    }

    session.open_compose();
    {
        let draft = session.compose_draft_mut();
        if let Some(title) = title {
            draft.title = title;
        }
        if let Some(content) = content {
            draft.content = content;
        }
    }

    if all_none && interactive && !prompt_fields(session, dictate)? {
        session.cancel_compose();
        ui::status("Cancelled.");
        return Ok(());
    }

    if dictate {
        dictate_content(session)?;
        print_draft(&session.state().compose.draft);
        if interactive && !ui::confirm("save?").unwrap_or(false) {
            session.cancel_compose();
            ui::status("Cancelled.");
            return Ok(());
        }
    }

    let ok = session.submit_compose();
    outcome(session, ok)?;

    if let Some(note) = session.last_created() {
        ui::status(&format!("Saved {}.", note.id));
    }
    Ok(())
}

/// Prompt for the title, and the content unless it will be dictated.
/// Returns false if the user backed out.
fn prompt_fields(session: &mut NoteSession, dictate: bool) -> Result<bool> {
    let Some(title) = ui::text_input("title:", None)? else {
        return Ok(false);
    };
    session.compose_draft_mut().title = title;

    if !dictate {
        let Some(content) = ui::text_input("content:", None)? else {
            return Ok(false);
        };
        session.compose_draft_mut().content = content;
    }
    Ok(true)
}

/// Record speech into the compose draft until the user presses enter
fn dictate_content(session: &mut NoteSession) -> Result<()> {
    let ok = session.start_dictation();
    outcome(session, ok)?;

    ui::wait_for_enter("Recording. Press enter to stop.")?;
    session.stop_dictation();

    if !session.finish_dictation(DICTATION_DRAIN_TIMEOUT) {
        ui::warning("Speech recognizer did not finish; later speech is dropped.");
    }
    // A recognition failure keeps whatever was captured before it
    if let Some(message) = session.error() {
        ui::warning(message);
        session.clear_error();
    }
    Ok(())
}
