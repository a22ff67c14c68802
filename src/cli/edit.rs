use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};

use super::display::print_draft;
use super::{outcome, ui};
use crate::session::NoteSession;

/// Actions offered while a note is open in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    Title,
    Content,
    Enhance,
    Save,
    Cancel,
}

impl EditAction {
    const ALL: &'static [EditAction] = &[
        EditAction::Title,
        EditAction::Content,
        EditAction::Enhance,
        EditAction::Save,
        EditAction::Cancel,
    ];

    fn label(self) -> &'static str {
        match self {
            EditAction::Title => "Edit title",
            EditAction::Content => "Edit content",
            EditAction::Enhance => "Enhance content",
            EditAction::Save => "Save",
            EditAction::Cancel => "Cancel",
        }
    }
}

/// Execute the edit command
pub fn run_edit(
    session: &mut NoteSession,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    enhance: bool,
) -> Result<()> {
    let id = id.trim();
    if enhance && content.is_some() {
        // The rewrite is of the stored content and would replace the given text
        return Err(anyhow!("--content and --enhance cannot be used together"));
    }
    let ok = session.list();
    outcome(session, ok)?;
    let ok = session.begin_edit(id);
    outcome(session, ok)?;

    if title.is_none() && content.is_none() && !enhance {
        if !io::stdin().is_terminal() {
            session.cancel_edit();
            return Err(anyhow!(
                "Nothing to change. Pass --title/--content/--enhance or run in a terminal."
            ));
        }
        return edit_interactively(session, id);
    }

    if let Some(draft) = session.edit_draft_mut() {
        if let Some(title) = title {
            draft.title = title;
        }
        if let Some(content) = content {
            draft.content = content;
        }
    }

    if enhance {
        let ok = session.enhance_draft_content(id);
        outcome(session, ok)?;
    }

    let ok = session.save_edit();
    outcome(session, ok)?;
    ui::status("Saved.");
    Ok(())
}

/// Execute the enhance command
pub fn run_enhance(session: &mut NoteSession, id: &str, save: bool) -> Result<()> {
    let id = id.trim();
    let ok = session.list();
    outcome(session, ok)?;
    let ok = session.begin_edit(id);
    outcome(session, ok)?;
    let ok = session.enhance_draft_content(id);
    outcome(session, ok)?;

    if let Some(editing) = session.state().editing.as_ref() {
        println!("{}", editing.draft.content);
    }

    if save {
        let ok = session.save_edit();
        outcome(session, ok)?;
        ui::status("Saved.");
    } else {
        session.cancel_edit();
    }
    Ok(())
}

/// Editor loop for the note currently in edit mode
pub(crate) fn edit_interactively(session: &mut NoteSession, id: &str) -> Result<()> {
    loop {
        let Some(editing) = session.state().editing.as_ref() else {
            return Ok(());
        };
        let draft = editing.draft.clone();

        println!();
        print_draft(&draft);

        let labels: Vec<&str> = EditAction::ALL.iter().map(|a| a.label()).collect();
        let Some(idx) = ui::select("", &labels)? else {
            session.cancel_edit();
            ui::status("Cancelled.");
            return Ok(());
        };

        match EditAction::ALL[idx] {
            EditAction::Title => {
                if let Some(value) = ui::text_input("title:", Some(draft.title.as_str()))? {
                    if let Some(d) = session.edit_draft_mut() {
                        d.title = value;
                    }
                }
            }
            EditAction::Content => {
                if let Some(value) = ui::text_input("content:", Some(draft.content.as_str()))? {
                    if let Some(d) = session.edit_draft_mut() {
                        d.content = value;
                    }
                }
            }
            EditAction::Enhance => {
                if !session.enhance_draft_content(id) {
                    report_error(session);
                }
            }
            EditAction::Save => {
                if session.save_edit() {
                    ui::status("Saved.");
                    return Ok(());
                }
                // Still editing; the user can retry or cancel
                report_error(session);
            }
            EditAction::Cancel => {
                session.cancel_edit();
                ui::status("Cancelled.");
                return Ok(());
            }
        }
    }
}

fn report_error(session: &mut NoteSession) {
    if let Some(message) = session.error() {
        ui::error(message);
    }
    session.clear_error();
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
    fn test_content_with_enhance_is_refused() {
        let mut session = NoteSession::new(Box::new(Unreachable));
        let result = run_edit(&mut session, "1", None, Some("typed".to_string()), true);
        assert!(result.is_err());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_edit_action_labels_unique() {
        let mut labels: Vec<&str> = EditAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), EditAction::ALL.len());
    }
}
