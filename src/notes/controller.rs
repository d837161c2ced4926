//! Note view controller.
//!
//! Owns the in-memory note list plus dialog and draft state, and
//! serializes user mutations against the store adapter. The list is a
//! derived cache of the store: mutations never touch it directly, every
//! visible change arrives through the subscription round-trip. This
//! keeps the view showing exactly what the store holds, at the cost of
//! one round-trip of latency per action.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error};

use crate::models::{Note, NoteDraft, NoteUpdate, User};
use crate::notes::service::NoteService;
use crate::notify::{Notifier, Prompter};
use crate::store::{DocumentStore, Subscription};

pub use crate::store::timestamp::format_timestamp;

#[derive(Default)]
struct ViewState {
    user: Option<User>,
    notes: Vec<Note>,
    search_term: String,
    create_dialog_open: bool,
    edit_dialog_open: bool,
    draft: NoteDraft,
    editing: Option<Note>,
    is_creating: bool,
    is_editing: bool,
    is_deleting: bool,
}

pub struct NotesController<S: DocumentStore> {
    service: NoteService<S>,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
    state: Arc<Mutex<ViewState>>,
    subscription: Mutex<Option<Subscription>>,
}

impl<S: DocumentStore> NotesController<S> {
    pub fn new(
        service: NoteService<S>,
        notifier: Arc<dyn Notifier>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            service,
            notifier,
            prompter,
            state: Arc::new(Mutex::new(ViewState::default())),
            subscription: Mutex::new(None),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        // A poisoned lock means a subscriber panicked mid-replace; the
        // state itself is still consistent, so recover the guard.
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    // ==================== SESSION ====================

    /// Attach the live subscription for `user`. At most one subscription
    /// is held at a time; re-attaching first releases the previous one.
    pub fn attach(&self, user: User) {
        self.detach();

        let uid = user.uid.clone();
        self.state().user = Some(user);

        let state = Arc::clone(&self.state);
        let subscription = self.service.subscribe_to_user_notes(&uid, move |notes| {
            // Wholesale replacement: idempotent, order-insensitive with
            // respect to racing mutation completions.
            state.lock().unwrap_or_else(|p| p.into_inner()).notes = notes;
        });

        *self.subscription_slot() = Some(subscription);
        debug!("attached note subscription for {uid}");
    }

    /// Release the subscription and clear session state. Safe to call
    /// repeatedly; the disposal handle is invoked exactly once.
    pub fn detach(&self) {
        let subscription = self.subscription_slot().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
            debug!("detached note subscription");
        }

        let mut state = self.state();
        state.user = None;
        state.notes.clear();
    }

    fn subscription_slot(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.subscription.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    // ==================== VIEW ====================

    /// The most recent subscription delivery, unfiltered.
    pub fn notes(&self) -> Vec<Note> {
        self.state().notes.clone()
    }

    pub fn set_search_term(&self, term: &str) {
        self.state().search_term = term.to_string();
    }

    pub fn search_term(&self) -> String {
        self.state().search_term.clone()
    }

    /// Pure projection, recomputed on every call: case-insensitive
    /// substring match of the search term against title or content. An
    /// empty term returns the full list in delivery order.
    pub fn filtered_notes(&self) -> Vec<Note> {
        let state = self.state();
        if state.search_term.is_empty() {
            return state.notes.clone();
        }
        state
            .notes
            .iter()
            .filter(|note| note.matches(&state.search_term))
            .cloned()
            .collect()
    }

    // ==================== CREATE ====================

    pub fn open_create_dialog(&self) {
        self.state().create_dialog_open = true;
    }

    /// Dismiss the create dialog, discarding the draft. Refused while a
    /// create is in flight so a half-closed dialog cannot lose state or
    /// double-submit.
    pub fn request_close_create_dialog(&self) -> bool {
        let mut state = self.state();
        if state.is_creating {
            return false;
        }
        state.create_dialog_open = false;
        state.draft.clear();
        true
    }

    pub fn create_dialog_open(&self) -> bool {
        self.state().create_dialog_open
    }

    pub fn set_draft_title(&self, title: &str) {
        self.state().draft.title = title.to_string();
    }

    pub fn set_draft_content(&self, content: &str) {
        self.state().draft.content = content.to_string();
    }

    pub fn draft(&self) -> NoteDraft {
        self.state().draft.clone()
    }

    pub fn is_creating(&self) -> bool {
        self.state().is_creating
    }

    /// Submit the create draft. A blank title blocks before any store
    /// call. On success the draft resets and the dialog closes; on
    /// failure both are left intact so the user can retry.
    pub async fn create_note(&self) {
        let (owner, draft) = {
            let mut state = self.state();
            if state.is_creating {
                return;
            }
            let Some(user) = &state.user else {
                return;
            };
            let owner = user.uid.clone();
            if !state.draft.is_submittable() {
                return;
            }
            let draft = NoteDraft::new(
                state.draft.title.trim(),
                state.draft.content.trim(),
            );
            state.is_creating = true;
            (owner, draft)
        };

        match self.service.create_note(&owner, &draft).await {
            Ok(_) => {
                self.notifier.success("Note created successfully!", None);
                let mut state = self.state();
                state.draft.clear();
                state.create_dialog_open = false;
            }
            Err(e) => {
                error!("failed to create note: {e}");
                self.notifier
                    .error("Failed to create note. Please try again.", None);
            }
        }

        self.state().is_creating = false;
    }

    // ==================== EDIT ====================

    /// Open the edit dialog over a clone of `note`, so in-progress edits
    /// never touch the live list until saved.
    pub fn open_edit_dialog(&self, note: &Note) {
        let mut state = self.state();
        state.editing = Some(note.clone());
        state.edit_dialog_open = true;
    }

    pub fn request_close_edit_dialog(&self) -> bool {
        let mut state = self.state();
        if state.is_editing {
            return false;
        }
        state.edit_dialog_open = false;
        state.editing = None;
        true
    }

    pub fn edit_dialog_open(&self) -> bool {
        self.state().edit_dialog_open
    }

    pub fn set_editing_title(&self, title: &str) {
        if let Some(editing) = &mut self.state().editing {
            editing.title = title.to_string();
        }
    }

    pub fn set_editing_content(&self, content: &str) {
        if let Some(editing) = &mut self.state().editing {
            editing.content = content.to_string();
        }
    }

    pub fn editing(&self) -> Option<Note> {
        self.state().editing.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.state().is_editing
    }

    /// Save the edit draft, writing title and content in full. Same
    /// guard, locking, and outcome handling as create.
    pub async fn save_edit(&self) {
        let (note_id, update) = {
            let mut state = self.state();
            if state.is_editing {
                return;
            }
            let Some(editing) = &state.editing else {
                return;
            };
            if editing.title.trim().is_empty() {
                return;
            }
            let note_id = editing.id.clone();
            let update = NoteUpdate {
                title: Some(editing.title.trim().to_string()),
                content: Some(editing.content.trim().to_string()),
            };
            state.is_editing = true;
            (note_id, update)
        };

        match self.service.update_note(&note_id, &update).await {
            Ok(()) => {
                self.notifier.success("Note updated successfully!", None);
                let mut state = self.state();
                state.editing = None;
                state.edit_dialog_open = false;
            }
            Err(e) => {
                error!("failed to update note {note_id}: {e}");
                self.notifier
                    .error("Failed to update note. Please try again.", None);
            }
        }

        self.state().is_editing = false;
    }

    // ==================== DELETE ====================

    pub fn is_deleting(&self) -> bool {
        self.state().is_deleting
    }

    /// Delete after a blocking confirmation prompt. Declining aborts
    /// before any store call.
    pub async fn delete_note(&self, note_id: &str) {
        if !self.prompter.confirm_delete() {
            return;
        }
        self.delete_note_confirmed(note_id).await;
    }

    /// Delete without prompting. Callers must have obtained an explicit
    /// confirmation already (e.g. a `--force` flag).
    pub async fn delete_note_confirmed(&self, note_id: &str) {
        {
            let mut state = self.state();
            if state.is_deleting {
                return;
            }
            state.is_deleting = true;
        }

        match self.service.delete_note(note_id).await {
            Ok(()) => {
                self.notifier.success(
                    "Note deleted successfully!",
                    Some("The note has been permanently removed."),
                );
            }
            Err(e) => {
                error!("failed to delete note {note_id}: {e}");
                self.notifier.error(
                    "Failed to delete note",
                    Some("Please try again. Make sure you have a stable internet connection."),
                );
            }
        }

        self.state().is_deleting = false;
    }
}
