use anyhow::{anyhow, Result};

use crate::cli::ui::text_input;
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Execute the add command. Missing fields are prompted for
/// interactively; a blank title aborts without writing anything.
pub async fn run_add<S: DocumentStore>(
    controller: &NotesController<S>,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => match text_input("title: ", None)? {
            Some(t) => t,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    if title.trim().is_empty() {
        return Err(anyhow!("A title is required."));
    }

    let content = match content {
        Some(c) => c,
        None => match text_input("content: ", None)? {
            Some(c) => c,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    controller.open_create_dialog();
    controller.set_draft_title(&title);
    controller.set_draft_content(&content);
    controller.create_note().await;

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

    fn controller() -> NotesController<SqliteStore> {
        let store = Arc::new(SqliteStore::open_memory().unwrap());
        let controller =
            NotesController::new(NoteService::new(store), term_notifier(), term_prompter());
        controller.attach(User::new(Some("Ana".to_string()), None));
        controller
    }

    #[tokio::test]
    async fn test_add_with_flags() {
        let controller = controller();
        run_add(
            &controller,
            Some("Groceries".to_string()),
            Some("milk, eggs".to_string()),
        )
        .await
        .unwrap();

        let notes = controller.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(notes[0].content, "milk, eggs");
    }

    #[tokio::test]
    async fn test_add_requires_title() {
        let controller = controller();
        let result = run_add(&controller, Some("   ".to_string()), None).await;
        assert!(result.is_err());
        assert!(controller.notes().is_empty());
    }
}
