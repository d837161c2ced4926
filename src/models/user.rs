use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity a session runs under. Only `uid` is
/// guaranteed; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl User {
    pub fn new(display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            email,
            display_name,
            photo_url: None,
        }
    }

    /// Name to show in prompts and headers, falling back to email, then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_uid() {
        let a = User::new(Some("Ana".to_string()), None);
        let b = User::new(Some("Ana".to_string()), None);
        assert_ne!(a.uid, b.uid);
    }

    #[test]
    fn test_label_fallbacks() {
        let mut user = User::new(None, None);
        assert_eq!(user.label(), user.uid);

        user.email = Some("ana@example.com".to_string());
        assert_eq!(user.label(), "ana@example.com");

        user.display_name = Some("Ana".to_string());
        assert_eq!(user.label(), "Ana");
    }
}
