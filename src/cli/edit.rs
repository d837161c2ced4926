use anyhow::Result;

use crate::cli::ui::{find_note_by_identifier, text_input};
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Execute the edit command. The note is looked up by id or title
/// search; fields not supplied as flags are prompted for with the
/// current value as the default.
pub async fn run_edit<S: DocumentStore>(
    controller: &NotesController<S>,
    identifier: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let notes = controller.notes();
    let Some(note) = find_note_by_identifier(&notes, identifier)? else {
        println!("No note matching \"{}\".", identifier);
        return Ok(());
    };

    let interactive = title.is_none() && content.is_none();

    let (title, content) = if interactive {
        let Some(title) = text_input("title: ", Some(&note.title))? else {
            println!("Cancelled.");
            return Ok(());
        };
        let Some(content) = text_input("content: ", Some(&note.content))? else {
            println!("Cancelled.");
            return Ok(());
        };
        (title, content)
    } else {
        (
            title.unwrap_or_else(|| note.title.clone()),
            content.unwrap_or_else(|| note.content.clone()),
        )
    };

    controller.open_edit_dialog(&note);
    controller.set_editing_title(&title);
    controller.set_editing_content(&content);
    controller.save_edit().await;

    Ok(())
}
