//! Durable key/value storage for the session. Values are plain strings under
//! fixed keys; typed access lives in [`crate::auth::session`].
//!
//! Both backends serialize access through an internal mutex. Nothing stops two
//! processes from racing on the same file; a single user running one client at
//! a time is assumed.

use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;
use tracing::debug;

/// File name of the durable store inside the session directory.
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store shared by the login controller and the guard.
pub trait SessionStore: Send + Sync {
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every key.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local store; used in tests and when nothing should outlive the run.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry, for assertions.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        lock(&self.entries).clone()
    }
}

impl SessionStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        lock(&self.entries).clear();
        Ok(())
    }
}

/// JSON file store that survives restarts, one object of string values.
///
/// Every operation re-reads the file so a session written by an earlier run is
/// picked up; writes go to a temporary file that is renamed into place.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    /// Store backed by `dir/session.json`; the directory is created lazily.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = create_private(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), keys = entries.len(), "session storage saved");
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let mut entries = self.load()?;
        apply(&mut entries);
        self.save(&entries)
    }
}

/// Tokens live in this file, so it is readable by the owner only.
#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl SessionStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = lock(&self.guard);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_get_set_remove_clear() {
        let store = MemoryStorage::new();
        assert_eq!(store.get("access_token").unwrap(), None);

        store.set("access_token", "tok").unwrap();
        store.set("user", "{}").unwrap();
        assert_eq!(store.get("access_token").unwrap().as_deref(), Some("tok"));

        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);
        assert_eq!(store.snapshot().len(), 1);

        store.clear().unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStorage::in_dir(dir.path());
        first.set("access_token", "tok").unwrap();
        first.set("user", r#"{"email":"ana@example.com"}"#).unwrap();

        let second = FileStorage::in_dir(dir.path());
        assert_eq!(second.get("access_token").unwrap().as_deref(), Some("tok"));
        assert_eq!(
            second.get("user").unwrap().as_deref(),
            Some(r#"{"email":"ana@example.com"}"#)
        );
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::in_dir(&dir.path().join("nested"));
        assert_eq!(store.get("access_token").unwrap(), None);
        store.remove("access_token").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_storage_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::in_dir(dir.path());
        store.set("access_token", "tok").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.get("access_token").unwrap(), None);
    }

    #[test]
    fn file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.get("access_token"),
            Err(StorageError::Json(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::in_dir(dir.path());
        store.set("access_token", "tok").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
