use thiserror::Error;

/// A create/update/delete against the document store failed. The caller
/// must not assume the write took effect.
#[derive(Debug, Error)]
pub enum StoreWriteError {
    #[error("no such document: {0}")]
    MissingDocument(String),
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(String),
}

/// A live query failed while evaluating a change. Reported to the log,
/// never surfaced to subscribers; there is no automatic retry.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("live query failed: {0}")]
    Query(#[source] rusqlite::Error),
    #[error("live query result was not a JSON object")]
    MalformedDocument,
}
