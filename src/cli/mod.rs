use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use crate::session::NoteSession;

pub mod add;
pub mod delete;
pub mod display;
pub mod edit;
pub mod list;
pub mod menu;
pub mod server;
pub mod ui;

pub use add::run_add;
pub use delete::run_delete;
pub use edit::{run_edit, run_enhance};
pub use list::{run_list, run_show};
pub use menu::run_menu;
pub use server::{run_health, run_seed};

#[derive(Parser)]
#[command(name = "notecmd")]
#[command(about = "Notes client for the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the notes service (overrides NOTES_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes
    List,
    /// Show one note in full
    Show(NoteIdArgs),
    /// Add a new note
    Add(AddArgs),
    /// Edit a note's title or content
    Edit(EditArgs),
    /// Preview an AI rewrite of a note's content
    Enhance(EnhanceArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Check that the notes service is reachable
    Health,
    /// Insert the service's sample notes
    Seed,
}

#[derive(Args)]
pub struct NoteIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    /// Dictate the content with the configured speech recognizer
    #[arg(short, long)]
    pub dictate: bool,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    /// Replace the content with an AI rewrite before saving
    #[arg(short, long, conflicts_with = "content")]
    pub enhance: bool,
}

#[derive(Args)]
pub struct EnhanceArgs {
    pub id: String,
    /// Store the rewrite instead of only printing it
    #[arg(short, long)]
    pub save: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Turn a session handler's outcome into a command result, taking the
/// message out of the session's error slot.
pub(crate) fn outcome(session: &mut NoteSession, ok: bool) -> Result<()> {
    if ok {
        return Ok(());
    }
    let message = session
        .error()
        .unwrap_or("Request failed")
        .to_string();
    session.clear_error();
    Err(anyhow!(message))
}
