//! Main menu for notecmd
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::Text;
use std::io::{self, IsTerminal};

use super::delete::confirm_and_delete;
use super::display::{note_summary, print_note, print_note_list};
use super::edit::edit_interactively;
use super::ui::{self, clear_screen, minimal_render_config};
use super::{outcome, run_add};
use crate::session::NoteSession;

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    Dictate,
    Show,
    Edit,
    Enhance,
    Delete,
    Refresh,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Add,
        MenuOption::Dictate,
        MenuOption::Show,
        MenuOption::Edit,
        MenuOption::Enhance,
        MenuOption::Delete,
        MenuOption::Refresh,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Add => "Add",
            MenuOption::Dictate => "Dictate",
            MenuOption::Show => "Show",
            MenuOption::Edit => "Edit",
            MenuOption::Enhance => "Enhance",
            MenuOption::Delete => "Delete",
            MenuOption::Refresh => "Refresh",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }

    /// Options that act on an existing note
    fn needs_note(self) -> bool {
        matches!(
            self,
            MenuOption::Show | MenuOption::Edit | MenuOption::Enhance | MenuOption::Delete
        )
    }
}

/// Run the interactive main menu
pub fn run_menu(session: &mut NoteSession) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            notecmd list\n  \
            notecmd add --title <title> --content <content>\n  \
            notecmd delete <id>\n  \
            Run 'notecmd --help' for all options."
        ));
    }

    session.list();
    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        // Clear screen - if this fails, continue anyway (degraded but functional)
        let _ = clear_screen();

        if session.state().loading {
            println!("Loading...");
        } else {
            print_note_list(session.notes());
        }
        if let Some(message) = session.error() {
            println!();
            ui::error(message);
        }
        session.clear_error();
        println!();

        let selection = match ui::select("notecmd", &menu_labels) {
            Ok(sel) => sel,
            Err(_) => return Ok(()),
        };

        let Some(choice) = selection
            .and_then(|idx| menu_labels.get(idx))
            .and_then(|label| MenuOption::from_label(label))
        else {
            // User pressed Escape
            return Ok(());
        };

        if choice == MenuOption::Quit {
            return Ok(());
        }

        match execute_command(session, choice) {
            Ok(true) => return Ok(()),
            Err(e) => {
                eprintln!("\nError: {}", e);
                wait_for_continue();
            }
            _ => {}
        }
    }
}

/// Execute a menu command, catching all errors
/// Returns Ok(true) if the user wants to quit the app
fn execute_command(session: &mut NoteSession, choice: MenuOption) -> Result<bool> {
    let id = if choice.needs_note() {
        match pick_note(session)? {
            Some(id) => id,
            None => return Ok(false),
        }
    } else {
        String::new()
    };

    match choice {
        MenuOption::Add => run_add(session, None, None, false).map(|_| false),
        MenuOption::Dictate => run_add(session, None, None, true).map(|_| false),
        MenuOption::Show => {
            if let Some(note) = session.state().find(&id) {
                let _ = clear_screen();
                print_note(note);
            }
            wait_for_continue();
            Ok(false)
        }
        MenuOption::Edit => {
            let ok = session.begin_edit(&id);
            outcome(session, ok)?;
            edit_interactively(session, &id).map(|_| false)
        }
        MenuOption::Enhance => {
            let ok = session.begin_edit(&id);
            outcome(session, ok)?;
            // Failure leaves the note open in the editor with its old content
            if !session.enhance_draft_content(&id) {
                if let Some(message) = session.error() {
                    ui::error(message);
                }
                session.clear_error();
            }
            edit_interactively(session, &id).map(|_| false)
        }
        MenuOption::Delete => {
            let ok = session.request_delete(&id);
            outcome(session, ok)?;
            confirm_and_delete(session, false).map(|_| false)
        }
        MenuOption::Refresh => {
            // Errors are shown on the next redraw
            session.list();
            Ok(false)
        }
        MenuOption::Quit => Ok(true),
    }
}

/// Let the user choose a note, returning its id
fn pick_note(session: &NoteSession) -> Result<Option<String>> {
    let notes = session.notes();
    if notes.is_empty() {
        println!("No notes.");
        wait_for_continue();
        return Ok(None);
    }

    let summaries: Vec<String> = notes.iter().map(note_summary).collect();
    let choice = ui::select_numbered("note", &summaries)?;
    Ok(choice.map(|idx| notes[idx].id.clone()))
}

/// Wait for user to press enter to continue
fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_option_roundtrip() {
        for opt in MenuOption::ALL {
            let label = opt.label();
            let recovered = MenuOption::from_label(label);
            assert_eq!(recovered, Some(*opt), "Failed roundtrip for {:?}", opt);
        }
    }

    #[test]
    fn test_menu_option_from_invalid_label() {
        assert_eq!(MenuOption::from_label("Invalid"), None);
        assert_eq!(MenuOption::from_label(""), None);
    }

    #[test]
    fn test_menu_option_all_has_correct_count() {
        assert_eq!(MenuOption::ALL.len(), 8);
    }

    #[test]
    fn test_note_options() {
        assert!(MenuOption::Edit.needs_note());
        assert!(MenuOption::Delete.needs_note());
        assert!(!MenuOption::Add.needs_note());
        assert!(!MenuOption::Refresh.needs_note());
    }
}
