//! Bearer-token session store.
//!
//! The token issued after the OAuth handoff is the only durable piece of
//! client state: written once at login, cleared at logout, read before
//! every authenticated request. [`SessionStore`] keeps that contract
//! behind an injectable seam so the client and service layers can be
//! exercised without touching the filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ClientError;

/// Process-wide session context with explicit `get`/`set`/`clear`.
///
/// Implementations must tolerate concurrent readers; writes are
/// user-serialized (login and logout are the only writers).
pub trait SessionStore: std::fmt::Debug + Send + Sync {
    /// Returns the stored bearer token, if any.
    fn get(&self) -> Option<String>;

    /// Stores a bearer token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Session`] when the backing storage cannot
    /// be written.
    fn set(&self, token: &str) -> Result<(), ClientError>;

    /// Removes the stored token. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Session`] when the backing storage cannot
    /// be modified.
    fn clear(&self) -> Result<(), ClientError>;
}

/// File-backed store: one token in a plain file under the user's config
/// directory (the durable-storage analog of browser local storage).
///
/// Reads hit the filesystem on every call so an external `logout` (or a
/// deleted file) is observed immediately, matching how the original
/// client re-reads local storage before each request.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Opens the store, creating the parent directory if needed.
    ///
    /// This is the process-start initialization step; it does not require
    /// the token file itself to exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Session`] when the parent directory cannot
    /// be created.
    pub fn open(path: PathBuf) -> Result<Self, ClientError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token file unreadable");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), ClientError> {
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e)),
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) -> Result<(), ClientError> {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileSessionStore) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir creation failed");
        };
        let path = dir.path().join("nested").join("token");
        let Ok(store) = FileSessionStore::open(path) else {
            panic!("store open failed");
        };
        (dir, store)
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = temp_store();
        assert!(store.set("jwt-abc123").is_ok());
        assert_eq!(store.get(), Some("jwt-abc123".to_string()));
    }

    #[test]
    fn set_replaces_previous_token() {
        let (_dir, store) = temp_store();
        assert!(store.set("first").is_ok());
        assert!(store.set("second").is_ok());
        assert_eq!(store.get(), Some("second".to_string()));
    }

    #[test]
    fn clear_removes_token_and_is_idempotent() {
        let (_dir, store) = temp_store();
        assert!(store.set("jwt").is_ok());
        assert!(store.clear().is_ok());
        assert_eq!(store.get(), None);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let (_dir, store) = temp_store();
        assert!(store.set("  jwt-with-newline\n").is_ok());
        assert_eq!(store.get(), Some("jwt-with-newline".to_string()));
    }

    #[test]
    fn empty_file_reads_as_none() {
        let (_dir, store) = temp_store();
        assert!(store.set("").is_ok());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(), None);
        assert!(store.set("tok").is_ok());
        assert_eq!(store.get(), Some("tok".to_string()));
        assert!(store.clear().is_ok());
        assert_eq!(store.get(), None);
    }
}
