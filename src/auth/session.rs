//! Typed view of the session over a [`SessionStore`]. Layout of the store:
//!
//! | key             | value                         |
//! |-----------------|-------------------------------|
//! | `access_token`  | opaque token string           |
//! | `refresh_token` | opaque token string, optional |
//! | `user`          | JSON-encoded [`UserRecord`]   |
//!
//! The presence of `access_token` is the only thing the guard looks at before
//! asking the identity service; nothing here checks a token's validity.

use crate::auth::{
    storage::{SessionStore, StorageError},
    types::{LoginResponse, UserRecord},
};
use secrecy::SecretString;
use tracing::warn;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// Writes a fresh session from a login response. Entries a previous login left
/// behind are removed when the new response does not carry them.
///
/// The access token is written last and any failed write clears the whole
/// session, so the store never holds a new token next to stale entries.
///
/// # Errors
/// Returns an error if the store cannot be written.
pub fn persist(store: &dyn SessionStore, response: &LoginResponse) -> Result<(), StorageError> {
    let result = write_session(store, response);
    if result.is_err() {
        if let Err(err) = clear(store) {
            warn!("failed to clear partially written session: {err}");
        }
    }
    result
}

fn write_session(store: &dyn SessionStore, response: &LoginResponse) -> Result<(), StorageError> {
    match &response.refresh_token {
        Some(token) => store.set(REFRESH_TOKEN_KEY, token)?,
        None => store.remove(REFRESH_TOKEN_KEY)?,
    }

    match &response.user {
        Some(user) => store.set(USER_KEY, &serde_json::to_string(user)?)?,
        None => store.remove(USER_KEY)?,
    }

    store.set(ACCESS_TOKEN_KEY, &response.access_token)
}

/// Stored access token; empty strings count as absent.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn access_token(store: &dyn SessionStore) -> Result<Option<SecretString>, StorageError> {
    Ok(store
        .get(ACCESS_TOKEN_KEY)?
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from))
}

/// Stored user record. A record that no longer parses is treated as absent.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn user(store: &dyn SessionStore) -> Result<Option<UserRecord>, StorageError> {
    let Some(raw) = store.get(USER_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(user) => Ok(Some(user)),
        Err(err) => {
            warn!("ignoring unreadable stored user record: {err}");
            Ok(None)
        }
    }
}

/// Drops the credentials the guard relies on: access token and user record.
///
/// # Errors
/// Returns an error if the store cannot be written.
pub fn invalidate(store: &dyn SessionStore) -> Result<(), StorageError> {
    store.remove(ACCESS_TOKEN_KEY)?;
    store.remove(USER_KEY)
}

/// Removes every session key, used on logout.
///
/// # Errors
/// Returns an error if the store cannot be written.
pub fn clear(store: &dyn SessionStore) -> Result<(), StorageError> {
    invalidate(store)?;
    store.remove(REFRESH_TOKEN_KEY)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryStorage;
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn response(value: serde_json::Value) -> LoginResponse {
        serde_json::from_value(value).unwrap()
    }

    /// Memory store whose writes to one key fail.
    struct FailingSet {
        inner: MemoryStorage,
        key: &'static str,
    }

    impl SessionStore for FailingSet {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.key {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }

        fn clear(&self) -> Result<(), StorageError> {
            self.inner.clear()
        }
    }

    #[test]
    fn failed_write_leaves_no_partial_session() {
        for key in [REFRESH_TOKEN_KEY, USER_KEY, ACCESS_TOKEN_KEY] {
            let store = FailingSet {
                inner: MemoryStorage::new(),
                key,
            };
            store.inner.set(ACCESS_TOKEN_KEY, "old").unwrap();
            store
                .inner
                .set(USER_KEY, r#"{"username":"previous-user"}"#)
                .unwrap();

            let result = persist(
                &store,
                &response(json!({
                    "access_token": "new",
                    "refresh_token": "ref",
                    "user": {"username": "ana"}
                })),
            );

            assert!(result.is_err(), "{key}");
            assert!(store.inner.snapshot().is_empty(), "{key}");
        }
    }

    #[test]
    fn persist_writes_all_fields() {
        let store = MemoryStorage::new();
        persist(
            &store,
            &response(json!({
                "access_token": "tok",
                "refresh_token": "ref",
                "user": {"username": "ana", "email": "ana@example.com"}
            })),
        )
        .unwrap();

        let token = access_token(&store).unwrap().unwrap();
        assert_eq!(token.expose_secret(), "tok");
        assert_eq!(
            store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("ref")
        );
        assert_eq!(user(&store).unwrap().unwrap().display_name(), "ana");
    }

    #[test]
    fn persist_drops_stale_entries() {
        let store = MemoryStorage::new();
        store.set(USER_KEY, r#"{"username":"old"}"#).unwrap();
        store.set(REFRESH_TOKEN_KEY, "old").unwrap();

        persist(&store, &response(json!({"access_token": "new"}))).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(ACCESS_TOKEN_KEY).map(String::as_str),
            Some("new")
        );
    }

    #[test]
    fn user_round_trips_through_store() {
        let store = MemoryStorage::new();
        let original: UserRecord = serde_json::from_value(json!({
            "username": "ana",
            "email": "ana@example.com",
            "uid": "42",
            "role": "admin"
        }))
        .unwrap();
        let login = LoginResponse {
            access_token: "tok".to_string(),
            refresh_token: None,
            user: Some(original.clone()),
            message: None,
        };

        persist(&store, &login).unwrap();
        assert_eq!(user(&store).unwrap(), Some(original));
    }

    #[test]
    fn blank_token_is_absent() {
        let store = MemoryStorage::new();
        store.set(ACCESS_TOKEN_KEY, "  ").unwrap();
        assert!(access_token(&store).unwrap().is_none());
    }

    #[test]
    fn unreadable_user_is_absent() {
        let store = MemoryStorage::new();
        store.set(USER_KEY, "{not json").unwrap();
        assert!(user(&store).unwrap().is_none());
    }

    #[test]
    fn invalidate_keeps_refresh_token_and_clear_drops_it() {
        let store = MemoryStorage::new();
        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.set(REFRESH_TOKEN_KEY, "ref").unwrap();
        store.set(USER_KEY, "{}").unwrap();

        invalidate(&store).unwrap();
        assert_eq!(
            store.snapshot().keys().collect::<Vec<_>>(),
            vec![REFRESH_TOKEN_KEY]
        );

        clear(&store).unwrap();
        assert!(store.snapshot().is_empty());
    }
}
