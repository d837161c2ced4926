use anyhow::Result;

use crate::cli::ui::{term_size, truncate};
use crate::models::Note;
use crate::notes::controller::format_timestamp;
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Execute the list command: print every note, newest first.
pub async fn run_list<S: DocumentStore>(controller: &NotesController<S>) -> Result<()> {
    let notes = controller.notes();
    print_notes(&notes);
    Ok(())
}

pub fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes yet. Create your first note with `notecmd add`.");
        return;
    }

    println!("Notes ({} total)\n", notes.len());
    for note in notes {
        println!("{}", format_note_row(note));
    }
}

/// One line per note: `title  [edited] timestamp  content preview`,
/// sized to the terminal width.
pub fn format_note_row(note: &Note) -> String {
    let (width, _) = term_size();

    let title = if note.title.is_empty() {
        "(untitled)".to_string()
    } else {
        truncate(&note.title, 32)
    };

    let when = format_timestamp(note.updated_at.as_ref().or(note.created_at.as_ref()));
    let when = if note.is_edited() && !when.is_empty() {
        format!("edited {}", when)
    } else {
        when
    };

    let preview_width = width.saturating_sub(34 + when.len() + 4).max(10);
    let preview = truncate(&note.content.replace('\n', " "), preview_width);

    let mut row = format!("{:<32}  {}", title, when);
    if !preview.is_empty() {
        row.push_str("  ");
        row.push_str(&preview);
    }
    row.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocTimestamp;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: "n1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            user_id: "u1".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_row_untitled_without_timestamps() {
        let row = format_note_row(&note("", ""));
        assert!(row.starts_with("(untitled)"));
        assert!(!row.contains("edited"));
    }

    #[test]
    fn test_row_marks_edited_notes() {
        let mut n = note("Standup", "notes from today");
        n.created_at = Some(DocTimestamp::from_millis(1_000));
        n.updated_at = Some(DocTimestamp::from_millis(2_000));
        let row = format_note_row(&n);
        assert!(row.contains("edited "));
    }

    #[test]
    fn test_row_flattens_multiline_content() {
        let row = format_note_row(&note("Plan", "line one\nline two"));
        assert!(row.contains("line one line two"));
        assert!(!row.contains('\n'));
    }
}
