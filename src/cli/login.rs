use anyhow::Result;

use crate::cli::ui::text_input;
use crate::models::User;
use crate::session::SessionStore;

/// Execute the login command: save a local identity to the session
/// file. Signing in again replaces the previous identity.
pub fn run_login(
    session: &SessionStore,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let name = match name {
        Some(n) => Some(n),
        None => match text_input("name: ", None)? {
            Some(n) if !n.trim().is_empty() => Some(n.trim().to_string()),
            Some(_) => None,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    let email = match email {
        Some(e) => Some(e),
        None => match text_input("email: ", None)? {
            Some(e) if !e.trim().is_empty() => Some(e.trim().to_string()),
            Some(_) => None,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    let user = User::new(name, email);
    session.save(&user)?;
    println!("Signed in as {}.", user.label());
    Ok(())
}

/// Execute the logout command.
pub fn run_logout(session: &SessionStore) -> Result<()> {
    session.clear()?;
    println!("Signed out.");
    Ok(())
}

/// Execute the whoami command.
pub fn run_whoami(session: &SessionStore) -> Result<()> {
    match session.load()? {
        Some(user) => {
            println!("{}", user.label());
            if let Some(email) = &user.email {
                if user.display_name.is_some() {
                    println!("{}", email);
                }
            }
            println!("uid: {}", user.uid);
        }
        None => println!("Not signed in. Run `notecmd login` first."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn test_login_saves_identity() {
        let (_dir, session) = session();
        run_login(
            &session,
            Some("Ana".to_string()),
            Some("ana@example.com".to_string()),
        )
        .unwrap();

        let user = session.load().unwrap().unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
        assert_eq!(user.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_login_replaces_previous_identity() {
        let (_dir, session) = session();
        run_login(
            &session,
            Some("Ana".to_string()),
            Some("ana@example.com".to_string()),
        )
        .unwrap();
        let first = session.load().unwrap().unwrap();

        run_login(
            &session,
            Some("Ben".to_string()),
            Some("ben@example.com".to_string()),
        )
        .unwrap();
        let second = session.load().unwrap().unwrap();

        assert_ne!(first.uid, second.uid);
        assert_eq!(second.display_name.as_deref(), Some("Ben"));
    }

    #[test]
    fn test_logout_clears_session() {
        let (_dir, session) = session();
        run_login(
            &session,
            Some("Ana".to_string()),
            Some("ana@example.com".to_string()),
        )
        .unwrap();
        run_logout(&session).unwrap();
        assert!(session.load().unwrap().is_none());
    }
}
