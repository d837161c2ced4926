//! Note store adapter: typed create/update/delete plus a live
//! subscription over the generic document store.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::models::{Note, NoteDraft, NoteUpdate};
use crate::store::timestamp::DocTimestamp;
use crate::store::{ChangeCallback, Document, DocumentStore, Fields, StoreWriteError, Subscription};

pub const NOTES_COLLECTION: &str = "notes";

pub struct NoteService<S> {
    store: Arc<S>,
}

impl<S> Clone for NoteService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> NoteService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new note owned by `owner_id`. Both timestamps are set to
    /// the same write time. Returns the store-assigned id.
    pub async fn create_note(
        &self,
        owner_id: &str,
        draft: &NoteDraft,
    ) -> Result<String, StoreWriteError> {
        let now = DocTimestamp::now().to_value();
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!(draft.title));
        fields.insert("content".to_string(), json!(draft.content));
        fields.insert("user_id".to_string(), json!(owner_id));
        fields.insert("created_at".to_string(), now.clone());
        fields.insert("updated_at".to_string(), now);

        self.store.insert(NOTES_COLLECTION, fields).await
    }

    /// Apply a partial update. `updated_at` is refreshed on every call,
    /// regardless of which fields changed.
    pub async fn update_note(
        &self,
        note_id: &str,
        update: &NoteUpdate,
    ) -> Result<(), StoreWriteError> {
        let mut fields = Fields::new();
        if let Some(title) = &update.title {
            fields.insert("title".to_string(), json!(title));
        }
        if let Some(content) = &update.content {
            fields.insert("content".to_string(), json!(content));
        }
        fields.insert("updated_at".to_string(), DocTimestamp::now().to_value());

        self.store.update(NOTES_COLLECTION, note_id, fields).await
    }

    /// Hard delete. No existence or ownership check at this layer.
    pub async fn delete_note(&self, note_id: &str) -> Result<(), StoreWriteError> {
        self.store.delete(NOTES_COLLECTION, note_id).await
    }

    /// Attach a live query scoped to `owner_id`. Every change, including
    /// the initial load, delivers the complete current set sorted by
    /// `updated_at` descending (`created_at` when absent).
    pub fn subscribe_to_user_notes(
        &self,
        owner_id: &str,
        on_change: impl Fn(Vec<Note>) + Send + Sync + 'static,
    ) -> Subscription {
        let callback: ChangeCallback = Arc::new(move |documents: Vec<Document>| {
            let mut notes: Vec<Note> = documents.iter().map(note_from_document).collect();
            notes.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
            on_change(notes);
        });

        self.store
            .subscribe(NOTES_COLLECTION, "user_id", json!(owner_id), callback)
    }
}

/// Map a raw document into a note. Missing string fields read as empty;
/// unparseable timestamps read as absent rather than erroring.
fn note_from_document(doc: &Document) -> Note {
    Note {
        id: doc.id.clone(),
        title: doc.get_str("title").to_string(),
        content: doc.get_str("content").to_string(),
        user_id: doc.get_str("user_id").to_string(),
        created_at: doc.get("created_at").and_then(DocTimestamp::from_value),
        updated_at: doc.get("updated_at").and_then(DocTimestamp::from_value),
    }
}
