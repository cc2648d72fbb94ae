//! File-backed key-value store.
//!
//! Each key lives in its own `<key>.json` file. Writes are staged to
//! `<key>.json.tmp` siblings and only moved into place once every entry
//! has been written. Each replaced file is first copied to a
//! `<key>.json.bak` sibling; if any key fails to install, the keys already
//! installed are rolled back from those copies.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{validate_key, KeyValueStore, StorageConfig, StorageError};

/// What a key held before the current write replaced it.
#[derive(Debug)]
enum Prior {
    /// Previous contents copied to this path
    Backup(PathBuf),
    /// No file existed
    Absent,
}

/// Key-value store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at the configured key-value directory.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.kv_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", key))
    }

    fn backup_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn stage(&self, key: &str, value: &str) -> Result<PathBuf, StorageError> {
        let path = self.staging_path_for(key);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(value.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(path)
    }

    /// Move a staged file over `key`, keeping a copy of what it replaces.
    ///
    /// On error the target is unchanged and no backup is left behind.
    fn install(&self, key: &str, staged: &Path) -> Result<Prior, StorageError> {
        let target = self.path_for(key);
        let prior = if target.exists() {
            let backup = self.backup_path_for(key);
            fs::copy(&target, &backup)?;
            Prior::Backup(backup)
        } else {
            Prior::Absent
        };

        if let Err(e) = fs::rename(staged, &target) {
            if let Prior::Backup(backup) = &prior {
                Self::remove_quietly(backup);
            }
            return Err(e.into());
        }
        Ok(prior)
    }

    /// Restore installed keys to what they held before, newest first.
    fn roll_back(&self, installed: &[(&str, Prior)]) {
        for (key, prior) in installed.iter().rev() {
            let target = self.path_for(key);
            let restored = match prior {
                Prior::Backup(backup) => fs::rename(backup, &target),
                Prior::Absent => fs::remove_file(&target),
            };
            if let Err(e) = restored {
                warn!("Failed to roll back key {} at {:?}: {}", key, target, e);
            }
        }
    }

    fn discard(staged: &[PathBuf]) {
        for path in staged {
            Self::remove_quietly(path);
        }
    }

    fn remove_quietly(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove {:?}: {}", path, e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            debug!("No value for key {} at {:?}", key, path);
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        debug!("Read {} bytes for key {}", contents.len(), key);
        Ok(Some(contents))
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, _) in entries {
            validate_key(key)?;
        }
        if entries.is_empty() {
            return Ok(());
        }

        self.ensure_dir()?;

        let mut staged = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match self.stage(key, value) {
                Ok(path) => staged.push(path),
                Err(e) => {
                    Self::discard(&staged);
                    return Err(e);
                }
            }
        }

        let mut installed: Vec<(&str, Prior)> = Vec::with_capacity(entries.len());
        for (i, ((key, _), staged_path)) in entries.iter().zip(&staged).enumerate() {
            match self.install(key, staged_path) {
                Ok(prior) => installed.push((*key, prior)),
                Err(e) => {
                    warn!("Failed to install key {}, rolling back: {}", key, e);
                    self.roll_back(&installed);
                    Self::discard(&staged[i..]);
                    return Err(e);
                }
            }
        }

        for (_, prior) in &installed {
            if let Prior::Backup(backup) = prior {
                Self::remove_quietly(backup);
            }
        }

        info!("Wrote {} keys to {:?}", entries.len(), self.dir);
        Ok(())
    }
}
