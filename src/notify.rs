//! Seams to the user-facing surfaces the note flow reports through.

/// Fire-and-forget success/error notifications, with an optional
/// secondary description line.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str, description: Option<&str>);
    fn error(&self, message: &str, description: Option<&str>);
}

/// Blocking user confirmations.
pub trait Prompter: Send + Sync {
    /// Ask before an irreversible delete. Returning false aborts.
    fn confirm_delete(&self) -> bool;
}
