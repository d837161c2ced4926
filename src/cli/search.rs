use anyhow::Result;

use crate::cli::list::print_notes;
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Execute the search command: filter the note list by a case-insensitive
/// substring match against title or content. An empty query lists
/// everything.
pub async fn run_search<S: DocumentStore>(
    controller: &NotesController<S>,
    query: &str,
) -> Result<()> {
    controller.set_search_term(query);
    let notes = controller.filtered_notes();

    if notes.is_empty() && !query.is_empty() {
        println!("No notes matching \"{}\".", query);
        return Ok(());
    }

    print_notes(&notes);
    Ok(())
}
