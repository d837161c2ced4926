use anyhow::Result;

use crate::cli::ui::find_note_by_identifier;
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Execute the delete command. Deletion prompts for confirmation unless
/// `force` is set; declining leaves the note untouched.
pub async fn run_delete<S: DocumentStore>(
    controller: &NotesController<S>,
    identifier: &str,
    force: bool,
) -> Result<()> {
    let notes = controller.notes();
    let Some(note) = find_note_by_identifier(&notes, identifier)? else {
        println!("No note matching \"{}\".", identifier);
        return Ok(());
    };

    if force {
        controller.delete_note_confirmed(&note.id).await;
    } else {
        controller.delete_note(&note.id).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::{term_notifier, term_prompter};
    use crate::models::User;
    use crate::notes::NoteService;
    use crate::store::SqliteStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_force_delete_by_title() {
        let store = Arc::new(SqliteStore::open_memory().unwrap());
        let controller =
            NotesController::new(NoteService::new(store), term_notifier(), term_prompter());
        controller.attach(User::new(None, None));
        controller.open_create_dialog();
        controller.set_draft_title("doomed");
        controller.create_note().await;

        run_delete(&controller, "doomed", true).await.unwrap();
        assert!(controller.notes().is_empty());
    }
}
