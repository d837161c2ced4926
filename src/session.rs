//! Persistent sign-in state. The active user is stored as JSON under the
//! platform config directory and loaded at startup; there is no remote
//! auth exchange behind it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::User;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session file at the default location
    /// (`~/.config/notecmd/session.json` on Linux).
    pub fn open() -> Result<Self> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(Self::at(config_dir.join("notecmd").join("session.json")))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The saved user, or None when signed out.
    pub fn load(&self) -> Result<Option<User>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file {}", self.path.display()))?;
        let user = serde_json::from_str(&raw)
            .with_context(|| format!("session file {} is corrupt", self.path.display()))?;
        Ok(Some(user))
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file {}", self.path.display()))?;
        Ok(())
    }

    /// Sign out. Removing an absent file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("failed to remove session file {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("nested").join("session.json"));
        (dir, store)
    }

    #[test]
    fn test_load_without_session_is_none() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = store();
        let user = User::new(Some("Ana".to_string()), Some("ana@example.com".to_string()));
        store.save(&user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));
    }

    #[test]
    fn test_clear_removes_session() {
        let (_dir, store) = store();
        store.save(&User::new(None, None)).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing again is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_errors() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        fs::write(&store.path, "not json").unwrap();
        assert!(store.load().is_err());
    }
}
