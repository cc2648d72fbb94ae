//! In-process key-value store.

use std::collections::HashMap;

use tracing::debug;

use super::{validate_key, KeyValueStore, StorageError};

/// Key-value store held in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            read_only: false,
        }
    }

    /// Reject every subsequent write.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteRejected("store is read-only".to_string()));
        }
        for (key, _) in entries {
            validate_key(key)?;
        }

        for (key, value) in entries {
            self.values.insert(key.to_string(), value.clone());
        }
        debug!("Stored {} keys in memory", entries.len());
        Ok(())
    }
}
