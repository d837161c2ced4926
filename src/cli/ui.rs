//! Shared UI primitives for notecmd
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `title: `
//! - Feedback: single line, no decoration

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, Select, Text};
use std::io::{self, Write};
use std::sync::Arc;

use crate::models::Note;
use crate::notes::controller::format_timestamp;
use crate::notify::{Notifier, Prompter};

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Clear the terminal screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Get terminal dimensions, defaulting to 80x24 if unavailable.
/// Falls back safely for pipes/non-TTY.
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

/// Get number of visible content lines for scrollable lists.
/// Accounts for header (2 lines) and status bar (2 lines).
pub fn visible_lines() -> usize {
    let (_, height) = term_size();
    height.saturating_sub(4).max(5)
}

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Prompt for text input with optional default value
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());

    if let Some(d) = default {
        if !d.is_empty() {
            builder = builder.with_default(d);
        }
    }

    Ok(builder.prompt_skippable()?)
}

/// Wait for user to press enter to continue
pub fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

// ============================================================================
// Note Lookup Helpers
// ============================================================================

/// One-line summary for selection menus: "title (timestamp)"
pub fn format_note_for_select(note: &Note) -> String {
    let title = if note.title.is_empty() {
        "(untitled)".to_string()
    } else {
        truncate(&note.title, 50)
    };
    let when = format_timestamp(note.updated_at.as_ref().or(note.created_at.as_ref()));
    if when.is_empty() {
        title
    } else {
        format!("{} ({})", title, when)
    }
}

/// Display a note selection menu using inquire Select.
/// Returns the selected Note or None if cancelled.
pub fn select_note(notes: &[Note]) -> Result<Option<Note>> {
    if notes.is_empty() {
        return Ok(None);
    }

    // Single match goes directly through
    if notes.len() == 1 {
        return Ok(Some(notes[0].clone()));
    }

    let options: Vec<String> = notes.iter().map(format_note_for_select).collect();

    let result = Select::new("Select:", options.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(visible_lines())
        .with_vim_mode(true)
        .prompt_skippable()?;

    match result {
        Some(selected) => {
            let idx = options.iter().position(|o| *o == selected).unwrap_or(0);
            Ok(Some(notes[idx].clone()))
        }
        None => Ok(None),
    }
}

/// Find a note by id or title search within the given list.
/// - An exact id match wins
/// - Otherwise matches title/content case-insensitively and prompts for
///   selection if multiple notes match
/// Returns None if not found or selection cancelled.
pub fn find_note_by_identifier(notes: &[Note], identifier: &str) -> Result<Option<Note>> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Ok(None);
    }

    if let Some(note) = notes.iter().find(|n| n.id == identifier) {
        return Ok(Some(note.clone()));
    }

    let matches: Vec<Note> = notes
        .iter()
        .filter(|n| n.matches(identifier))
        .cloned()
        .collect();

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.into_iter().next()),
        _ => select_note(&matches),
    }
}

// ============================================================================
// Terminal Collaborators
// ============================================================================

/// Notifier that prints to the terminal: successes on stdout, errors on
/// stderr with an `Error:` prefix.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn success(&self, message: &str, description: Option<&str>) {
        println!("{}", message);
        if let Some(description) = description {
            println!("{}", description);
        }
    }

    fn error(&self, message: &str, description: Option<&str>) {
        eprintln!("Error: {}", message);
        if let Some(description) = description {
            eprintln!("{}", description);
        }
    }
}

/// Prompter backed by an inquire confirmation (default: no). Prompt
/// failures count as a refusal.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn confirm_delete(&self) -> bool {
        Confirm::new("Delete this note? This action cannot be undone.")
            .with_render_config(minimal_render_config())
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}

pub fn term_notifier() -> Arc<dyn Notifier> {
    Arc::new(TermNotifier)
}

pub fn term_prompter() -> Arc<dyn Prompter> {
    Arc::new(TermPrompter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            user_id: "u1".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_minimal_render_config() {
        let config = minimal_render_config();
        let _ = config;
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
    }

    #[test]
    fn test_format_note_for_select_untitled() {
        assert_eq!(format_note_for_select(&note("n1", "", "")), "(untitled)");
    }

    #[test]
    fn test_find_note_by_id() {
        let notes = [note("n1", "alpha", ""), note("n2", "beta", "")];
        let found = find_note_by_identifier(&notes, "n2").unwrap().unwrap();
        assert_eq!(found.title, "beta");
    }

    #[test]
    fn test_find_note_by_title_substring() {
        let notes = [note("n1", "Grocery List", ""), note("n2", "Standup", "")];
        let found = find_note_by_identifier(&notes, "grocery").unwrap().unwrap();
        assert_eq!(found.id, "n1");
    }

    #[test]
    fn test_find_note_no_match() {
        let notes = [note("n1", "alpha", "")];
        assert!(find_note_by_identifier(&notes, "zzz").unwrap().is_none());
        assert!(find_note_by_identifier(&notes, "   ").unwrap().is_none());
    }
}
