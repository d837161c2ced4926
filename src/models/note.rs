use crate::store::timestamp::DocTimestamp;

/// A single persisted note. `id` is assigned by the store on creation;
/// timestamps are written by the store adapter and may be absent on
/// documents produced by other writers.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub created_at: Option<DocTimestamp>,
    pub updated_at: Option<DocTimestamp>,
}

impl Note {
    /// Effective sort key in epoch milliseconds: `updated_at`, falling back
    /// to `created_at`, falling back to zero for documents missing both.
    pub fn sort_key(&self) -> i64 {
        self.updated_at
            .or(self.created_at)
            .map(|ts| ts.millis())
            .unwrap_or(0)
    }

    /// Case-insensitive substring match against title or content.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    /// Whether the note has been modified since creation.
    pub fn is_edited(&self) -> bool {
        match (self.created_at, self.updated_at) {
            (Some(created), Some(updated)) => updated != created,
            _ => false,
        }
    }
}

/// Draft buffer backing the create dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// A draft can be submitted once the trimmed title is non-empty.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

/// Partial update payload: only the supplied fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: "n1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            user_id: "u1".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_matches_case_insensitive() {
        let n = note("Grocery List", "milk and EGGS");
        assert!(n.matches("grocery"));
        assert!(n.matches("GROCERY"));
        assert!(n.matches("eggs"));
        assert!(!n.matches("bread"));
    }

    #[test]
    fn test_matches_content_only() {
        let n = note("Untitled", "meeting at noon");
        assert!(n.matches("noon"));
    }

    #[test]
    fn test_sort_key_prefers_updated_at() {
        let mut n = note("a", "");
        n.created_at = Some(DocTimestamp::from_millis(1_000));
        n.updated_at = Some(DocTimestamp::from_millis(2_000));
        assert_eq!(n.sort_key(), 2_000);
    }

    #[test]
    fn test_sort_key_falls_back_to_created_at() {
        let mut n = note("a", "");
        n.created_at = Some(DocTimestamp::from_millis(1_000));
        assert_eq!(n.sort_key(), 1_000);
    }

    #[test]
    fn test_sort_key_missing_timestamps_is_zero() {
        assert_eq!(note("a", "").sort_key(), 0);
    }

    #[test]
    fn test_is_edited() {
        let mut n = note("a", "");
        assert!(!n.is_edited());

        let t = DocTimestamp::from_millis(1_000);
        n.created_at = Some(t);
        n.updated_at = Some(t);
        assert!(!n.is_edited());

        n.updated_at = Some(DocTimestamp::from_millis(2_000));
        assert!(n.is_edited());
    }

    #[test]
    fn test_draft_submittable() {
        assert!(!NoteDraft::default().is_submittable());
        assert!(!NoteDraft::new("   ", "content").is_submittable());
        assert!(NoteDraft::new("Hello", "").is_submittable());
    }

    #[test]
    fn test_draft_clear() {
        let mut draft = NoteDraft::new("Hello", "World");
        draft.clear();
        assert_eq!(draft, NoteDraft::default());
    }
}
