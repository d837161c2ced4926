mod note;
mod user;

pub use note::{Note, NoteDraft, NoteUpdate};
pub use user::User;
