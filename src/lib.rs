//! # Authgate (session gate client)
//!
//! `authgate` signs a user in against a remote identity service, keeps the
//! returned tokens in a durable session store and guards a protected page by
//! re-validating the stored token on every visit.
//!
//! ## Flow
//!
//! 1. **Login:** the form collects email and password and `POST`s them to
//!    `{base}/login`. On success the access token (plus the refresh token and the
//!    user record when present) is written to the session store and the client
//!    navigates to `/`, replacing the history entry.
//! 2. **Guard:** visiting `/` reads the access token. Without one the client goes
//!    straight to `/login`; with one it calls `GET {base}/me` with
//!    `Authorization: Bearer`. A rejection clears the session and redirects.
//! 3. **Logout:** best-effort `GET {base}/logout`, then the session is cleared.
//!
//! ## Security boundary
//!
//! The guard is a UX affordance. It decides what to render, not who may access
//! data: the identity service must reject invalid tokens on its own. Stored
//! credentials are not encrypted; keep the session directory private.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_user_agent() {
        assert!(APP_USER_AGENT.starts_with("authgate/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
