//! Durable key-value storage.
//!
//! Every persisted value is a JSON string stored under a [`StorageKey`].
//! The file-backed medium keeps one file per key in the data directory:
//!
//! ```text
//! ~/.local/share/platejoy/
//! ├── current-session.json           # Session of the logged-in account
//! ├── account-collection.json        # all registered accounts
//! ├── week-plan-<account-id>.json    # weekly planner grid
//! └── favorites-<account-id>.json    # favorite recipe ids
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// File extension for stored values.
const VALUE_EXTENSION: &str = "json";

/// Suffix for values staged but not yet renamed into place.
const STAGING_SUFFIX: &str = "tmp";

/// Key of a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The active session (never contains a credential).
    CurrentSession,
    /// Every registered account, credentials included.
    AccountCollection,
    /// Weekly meal plan of one account.
    WeekPlan(Uuid),
    /// Favorite recipes of one account.
    Favorites(Uuid),
}

impl StorageKey {
    /// Returns the key as stored in the medium.
    pub fn name(&self) -> String {
        match self {
            StorageKey::CurrentSession => "current-session".to_string(),
            StorageKey::AccountCollection => "account-collection".to_string(),
            StorageKey::WeekPlan(id) => format!("week-plan-{}", id),
            StorageKey::Favorites(id) => format!("favorites-{}", id),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single write inside [`KeyValueStore::write_batch`].
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Set(StorageKey, String),
    Remove(StorageKey),
}

/// Errors that can occur while reading or writing the storage medium.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    IoError(PathBuf, #[source] io::Error),

    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },
}

/// A durable key-value medium holding JSON strings.
pub trait KeyValueStore {
    /// Returns the stored value, or `Ok(None)` if the key is absent.
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Stores a value, replacing any previous one.
    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Returns `Ok(false)` if there was nothing to remove.
    fn remove(&mut self, key: &StorageKey) -> Result<bool, StorageError>;

    /// Applies several writes as one unit.
    ///
    /// The default applies them in order; implementations that can stage
    /// writes override it so that a failure leaves every key untouched.
    fn write_batch(&mut self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        for op in ops {
            match op {
                BatchOp::Set(key, value) => self.set(&key, &value)?,
                BatchOp::Remove(key) => {
                    self.remove(&key)?;
                }
            }
        }
        Ok(())
    }
}

/// Reads and decodes a JSON value.
pub fn read_json<T, S>(storage: &S, key: &StorageKey) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.clone(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encodes a value as JSON for the given key.
pub fn encode_json<T: Serialize>(key: &StorageKey, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.clone(),
        source,
    })
}

/// Encodes and stores a JSON value.
pub fn write_json<T, S>(storage: &mut S, key: &StorageKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = encode_json(key, value)?;
    storage.set(key, &raw)
}

/// File-backed storage: one `<key>.json` file per key.
///
/// Writes go to a staging file that is renamed into place, so a value is
/// never observed half-written.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new storage instance rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &StorageKey) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", key.name(), VALUE_EXTENSION))
    }

    fn staging_path(&self, key: &StorageKey) -> PathBuf {
        self.data_dir.join(format!(
            "{}.{}.{}",
            key.name(),
            VALUE_EXTENSION,
            STAGING_SUFFIX
        ))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))
    }

    fn stage(&self, key: &StorageKey, value: &str) -> Result<PathBuf, StorageError> {
        let staging = self.staging_path(key);
        fs::write(&staging, value).map_err(|e| StorageError::IoError(staging.clone(), e))?;
        Ok(staging)
    }

    fn commit(&self, staging: &Path, key: &StorageKey) -> Result<(), StorageError> {
        let path = self.path(key);
        fs::rename(staging, &path).map_err(|e| StorageError::IoError(path, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.ensure_dir()?;
        let staging = self.stage(key, value)?;
        self.commit(&staging, key)?;
        tracing::debug!("Wrote {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<bool, StorageError> {
        let path = self.path(key);

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed {}", key);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    /// Stages every value before renaming any of them. If a rename fails,
    /// keys renamed before it stay committed and the rest are discarded.
    fn write_batch(&mut self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let mut staged: Vec<(PathBuf, StorageKey)> = Vec::new();
        for op in &ops {
            if let BatchOp::Set(key, value) = op {
                match self.stage(key, value) {
                    Ok(staging) => staged.push((staging, key.clone())),
                    Err(e) => {
                        for (staging, _) in &staged {
                            fs::remove_file(staging).ok();
                        }
                        return Err(e);
                    }
                }
            }
        }

        for (i, (staging, key)) in staged.iter().enumerate() {
            if let Err(e) = self.commit(staging, key) {
                // Keys before `i` are already in place.
                for (pending, _) in &staged[i..] {
                    fs::remove_file(pending).ok();
                }
                return Err(e);
            }
        }
        for op in ops {
            if let BatchOp::Remove(key) = op {
                self.remove(&key)?;
            }
        }

        tracing::debug!("Committed batch of {} value(s)", staged.len());
        Ok(())
    }
}

/// In-memory storage, lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<StorageKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.clone(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<bool, StorageError> {
        Ok(self.values.remove(key).is_some())
    }
}
