use std::sync::Arc;

use clap::Parser;
use notecmd::cli::ui::{term_notifier, term_prompter};
use notecmd::cli::{
    run_add, run_delete, run_edit, run_list, run_login, run_logout, run_menu, run_search,
    run_whoami, Cli, Commands,
};
use notecmd::notes::{NoteService, NotesController};
use notecmd::session::SessionStore;
use notecmd::store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let session = SessionStore::open()?;

    match cli.command {
        Some(Commands::Login(args)) => run_login(&session, args.name, args.email),
        Some(Commands::Logout) => run_logout(&session),
        Some(Commands::Whoami) => run_whoami(&session),
        command => run_note_command(&session, command).await,
    }
}

/// Everything except session management needs a signed-in user and a
/// live note subscription.
async fn run_note_command(
    session: &SessionStore,
    command: Option<Commands>,
) -> anyhow::Result<()> {
    let Some(user) = session.load()? else {
        println!("Not signed in. Run `notecmd login` first.");
        return Ok(());
    };

    let store = Arc::new(SqliteStore::open()?);
    let controller = NotesController::new(
        NoteService::new(store),
        term_notifier(),
        term_prompter(),
    );
    controller.attach(user);

    let result = match command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&controller).await
        }
        Some(Commands::List) => run_list(&controller).await,
        Some(Commands::Search(args)) => run_search(&controller, &args.query).await,
        Some(Commands::Add(args)) => run_add(&controller, args.title, args.content).await,
        Some(Commands::Edit(args)) => {
            run_edit(&controller, &args.identifier, args.title, args.content).await
        }
        Some(Commands::Delete(args)) => {
            run_delete(&controller, &args.identifier, args.force).await
        }
        // Session commands are dispatched before this point.
        Some(Commands::Login(_)) | Some(Commands::Logout) | Some(Commands::Whoami) => Ok(()),
    };

    controller.detach();
    result
}
