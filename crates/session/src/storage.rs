//! Durable client-side credential storage.
//!
//! A tiny key/value store under fixed keys, mirroring what the browser build
//! keeps in local storage. [`FileStorage`] is the durable implementation (a
//! single JSON object file, written through on every mutation);
//! [`MemoryStorage`] backs tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Storage key for the access token.
pub const KEY_ACCESS_TOKEN: &str = "token";
/// Storage key for the refresh token.
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
/// Storage key for the serialized identity.
pub const KEY_USER: &str = "user";

/// Errors from the durable credential store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read credential store: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write credential store: {0}")]
    Write(#[source] std::io::Error),
}

/// Key/value persistence for session credentials.
///
/// Reads are infallible (a missing key is simply `None`); writes surface IO
/// failures so callers know credentials did not stick.
pub trait CredentialStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// File-backed storage: one JSON object, written through on every mutation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file starts an empty store. A corrupt file is discarded
    /// with a warning rather than failing the session restore path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt credential store");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Read(e)),
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .expect("string map is always serialisable");
        std::fs::write(&self.path, raw).map_err(StorageError::Write)
    }
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
