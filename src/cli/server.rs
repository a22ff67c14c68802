//! Service maintenance commands that bypass the session.

use anyhow::{anyhow, Result};

use super::ui;
use crate::api::RemoteNotesApi;

/// Execute the health command
pub fn run_health(api: &RemoteNotesApi) -> Result<()> {
    let health = api.health_check()?;
    if !health.is_healthy() {
        return Err(anyhow!("{} reports status '{}'", api.base_url(), health.status));
    }
    ui::status(&format!("{} is {}.", api.base_url(), health.status));
    Ok(())
}

/// Execute the seed command
pub fn run_seed(api: &RemoteNotesApi) -> Result<()> {
    let ids = api.populate()?;
    match ids.len() {
        0 => ui::status("No notes inserted."),
        1 => ui::status("Inserted 1 note."),
        n => ui::status(&format!("Inserted {} notes.", n)),
    }
    for id in ids {
        println!("  {}", id);
    }
    Ok(())
}
