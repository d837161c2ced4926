//! Generic document store: schemaless collections of JSON documents with
//! insert-with-autoid, merge updates, hard deletes, and push-based live
//! queries. The note layer depends only on the [`DocumentStore`] trait;
//! [`sqlite::SqliteStore`] is the shipped backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub mod errors;
pub mod sqlite;
pub mod timestamp;

pub use errors::{StoreWriteError, SubscriptionError};
pub use sqlite::SqliteStore;
pub use timestamp::DocTimestamp;

/// The field map of a document body.
pub type Fields = serde_json::Map<String, Value>;

/// A document as delivered by a live query.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String field accessor; missing or non-string fields read as empty.
    pub fn get_str(&self, field: &str) -> &str {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Callback invoked with the complete current result set of a live query.
pub type ChangeCallback = Arc<dyn Fn(Vec<Document>) + Send + Sync>;

/// Disposal handle for a live query. Dropping the handle also cancels the
/// query; after `unsubscribe` returns, the callback will not be invoked
/// again, even for changes already committed but not yet delivered.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Minimal contract the note layer needs from a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, returning its store-assigned id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreWriteError>;

    /// Merge the supplied fields into an existing document. Fields not
    /// present in `fields` are left untouched. Updating a missing
    /// document is an error.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreWriteError>;

    /// Remove a document unconditionally. Deleting a missing document is
    /// not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreWriteError>;

    /// Establish a live query over `collection` filtered to documents
    /// whose `field` equals `value`. The callback receives the complete
    /// current matching set immediately on registration and again after
    /// every committed change to the collection. Query failures are
    /// logged and skipped; they never propagate to the subscriber.
    fn subscribe(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        on_change: ChangeCallback,
    ) -> Subscription;
}
