pub mod cli;
pub mod models;
pub mod notes;
pub mod notify;
pub mod session;
pub mod store;

pub use notes::{NoteService, NotesController};
