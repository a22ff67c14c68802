use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use super::ui::{first_line, truncate};
use crate::models::{Note, NoteDraft};

const TITLE_WIDTH: usize = 32;
const PREVIEW_WIDTH: usize = 40;

/// One-line summary used in lists and pickers
pub fn note_summary(note: &Note) -> String {
    let title = if note.title.trim().is_empty() {
        "(untitled)"
    } else {
        note.title.as_str()
    };
    let preview = truncate(first_line(&note.content), PREVIEW_WIDTH);
    if preview.is_empty() {
        truncate(title, TITLE_WIDTH)
    } else {
        format!("{}  {}", truncate(title, TITLE_WIDTH), preview)
    }
}

/// Print the collection, one note per line
pub fn print_note_list(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes.");
        return;
    }
    for note in notes {
        println!("{:<12} {}", note.id, note_summary(note));
    }
}

/// Print a note with all fields
pub fn print_note(note: &Note) {
    let title = if note.title.is_empty() { "(untitled)" } else { note.title.as_str() };
    println!("{}\n", title);

    for line in note.content.lines() {
        println!("  {}", line);
    }

    println!();
    println!("  id       {}", note.id);
    println!("  created  {}", format_timestamp(&note.created_at));
    if let Some(ref updated) = note.updated_at {
        println!("  updated  {}", format_timestamp(updated));
    }
}

/// Print a draft being composed or edited
pub fn print_draft(draft: &NoteDraft) {
    println!("title: {}", draft.title);
    println!("content:");
    for line in draft.content.lines() {
        println!("  {}", line);
    }
}

/// Render a server timestamp in local time. Timestamps without an offset
/// are UTC; anything unparseable is shown as received.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, content: &str) -> Note {
        Note {
            id: "1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: "2024-05-01T10:00:00".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let dt = parse_timestamp("2024-12-01T10:20:30.123456").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-12-01T10:20:30.123456+00:00");
    }

    #[test]
    fn test_parse_offset_timestamp() {
        let dt = parse_timestamp("2024-12-01T12:20:30+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:20");
    }

    #[test]
    fn test_unparseable_timestamp_kept() {
        assert_eq!(format_timestamp("t0"), "t0");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn test_summary_uses_first_content_line() {
        let note = sample("Groceries", "milk\neggs");
        assert_eq!(note_summary(&note), "Groceries  milk");
    }

    #[test]
    fn test_summary_of_empty_note() {
        assert_eq!(note_summary(&sample("", "")), "(untitled)");
    }
}
