//! Main menu for notecmd
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::{Select, Text};
use std::io::{self, IsTerminal};

use crate::cli::ui::{clear_screen, minimal_render_config, wait_for_continue};
use crate::cli::{run_add, run_delete, run_edit, run_list, run_search};
use crate::notes::NotesController;
use crate::store::DocumentStore;

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    List,
    Search,
    Add,
    Edit,
    Delete,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::List,
        MenuOption::Search,
        MenuOption::Add,
        MenuOption::Edit,
        MenuOption::Delete,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::List => "List",
            MenuOption::Search => "Search",
            MenuOption::Add => "Add",
            MenuOption::Edit => "Edit",
            MenuOption::Delete => "Delete",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// Run the interactive main menu
pub async fn run_menu<S: DocumentStore>(controller: &NotesController<S>) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            notecmd list\n  \
            notecmd search <query>\n  \
            notecmd add --title <title>\n  \
            Run 'notecmd --help' for all options."
        ));
    }

    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        // Clear screen - if this fails, continue anyway (degraded but functional)
        let _ = clear_screen();

        let selection = Select::new("notecmd", menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Handle prompt errors (Ctrl+C, terminal issues) - exit gracefully
        let selection = match selection {
            Ok(sel) => sel,
            Err(_) => return Ok(()),
        };

        let Some(choice_label) = selection else {
            // User pressed Escape
            return Ok(());
        };

        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };

        if choice == MenuOption::Quit {
            return Ok(());
        }

        let _ = clear_screen();

        match execute_command(controller, choice).await {
            Ok(()) => wait_for_continue(),
            Err(e) => {
                eprintln!("\nError: {}", e);
                wait_for_continue();
            }
        }
    }
}

/// Execute a menu command, catching all errors
async fn execute_command<S: DocumentStore>(
    controller: &NotesController<S>,
    choice: MenuOption,
) -> Result<()> {
    match choice {
        MenuOption::List => run_list(controller).await,
        MenuOption::Search => {
            let query = prompt_for_input("search: ")?;
            run_search(controller, &query).await
        }
        MenuOption::Add => run_add(controller, None, None).await,
        MenuOption::Edit => {
            let identifier = prompt_for_input("note: ")?;
            if identifier.is_empty() {
                return Ok(());
            }
            run_edit(controller, &identifier, None, None).await
        }
        MenuOption::Delete => {
            let identifier = prompt_for_input("note: ")?;
            if identifier.is_empty() {
                return Ok(());
            }
            run_delete(controller, &identifier, false).await
        }
        MenuOption::Quit => Ok(()),
    }
}

/// Prompt for text input, returning empty string on cancel
fn prompt_for_input(label: &str) -> Result<String> {
    let result = Text::new(label)
        .with_render_config(minimal_render_config())
        .prompt_skippable()?;
    Ok(result.unwrap_or_default())
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
        assert_eq!(MenuOption::ALL.len(), 6);
    }
}
