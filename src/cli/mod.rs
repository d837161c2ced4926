use clap::{Args, Parser, Subcommand};

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod login;
pub mod menu;
pub mod search;
pub mod ui;

pub use add::run_add;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use login::{run_login, run_logout, run_whoami};
pub use menu::run_menu;
pub use search::run_search;

#[derive(Parser)]
#[command(name = "notecmd")]
#[command(about = "Personal notes for the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes, newest first
    List,
    /// Search notes by title or content
    Search(SearchArgs),
    /// Add a new note
    Add(AddArgs),
    /// Edit an existing note
    Edit(EditArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Sign in with a local identity
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in identity
    Whoami,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query matched against title and content
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note id or title search
    pub identifier: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note id or title search
    pub identifier: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
}
