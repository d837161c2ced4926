pub mod controller;
pub mod service;

pub use controller::NotesController;
pub use service::NoteService;
