//! Local key-value persistence.
//!
//! The ladder persists two JSON values under fixed keys:
//! - `tennisPlayers`: array of players
//! - `tennisMatches`: array of match records
//!
//! Backends only deal in keys and strings; encoding lives with the ladder.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Key holding the serialized player list.
pub const PLAYERS_KEY: &str = "tennisPlayers";

/// Key holding the serialized match list.
pub const MATCHES_KEY: &str = "tennisMatches";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

/// A string-valued key-value namespace.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry as one unit.
    ///
    /// On error no entry may be observable through a later `get`.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_all(entries)
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding one file per key.
    pub fn kv_dir(&self) -> PathBuf {
        self.data_dir.join("kv")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
