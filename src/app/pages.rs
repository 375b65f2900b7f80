//! Terminal rendering for the two pages. Output is plain text so it can be
//! piped or captured in tests.

use crate::auth::types::UserRecord;
use std::io::{self, Write};

pub fn render_login(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Sign in")?;
    out.flush()
}

pub fn render_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "error: {message}")?;
    out.flush()
}

/// Placeholder shown while the guard is checking the session. A user record
/// left by the last login is only a hint; nothing is shown from it until the
/// guard has validated the token.
pub fn render_loading(out: &mut impl Write, cached: Option<&UserRecord>) -> io::Result<()> {
    match cached {
        Some(user) => writeln!(out, "Loading session for {}...", user.display_name())?,
        None => writeln!(out, "Loading...")?,
    }
    out.flush()
}

pub fn render_protected(out: &mut impl Write, user: &UserRecord) -> io::Result<()> {
    writeln!(out, "Protected page")?;
    writeln!(out, "Welcome, {}", user.display_name())?;
    if let Some(email) = user.email.as_deref() {
        writeln!(out, "{email}")?;
    }
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn protected_page_shows_name_and_email() {
        let user = UserRecord {
            username: Some("ana".to_string()),
            email: Some("ana@example.com".to_string()),
            ..UserRecord::default()
        };
        let mut out = Vec::new();
        render_protected(&mut out, &user).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Protected page\nWelcome, ana\nana@example.com\n"
        );
    }

    #[test]
    fn loading_names_the_cached_user() {
        let user = UserRecord {
            username: Some("ana".to_string()),
            ..UserRecord::default()
        };
        let mut out = Vec::new();
        render_loading(&mut out, Some(&user)).unwrap();
        render_loading(&mut out, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Loading session for ana...\nLoading...\n"
        );
    }

    #[test]
    fn error_is_prefixed() {
        let mut out = Vec::new();
        render_error(&mut out, "boom").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "error: boom\n");
    }
}
