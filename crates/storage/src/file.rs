//! FileArea: persistent storage area backed by a JSON file
//!
//! The whole namespace is one JSON object `{ key: text, ... }`. Every mutation
//! rewrites the file atomically (write to a temp file, fsync, rename), so a
//! crash leaves either the old or the new contents, never a torn file.
//!
//! An exclusive lock on `<dir>/.lock` is held for the lifetime of the area to
//! keep a second process from interleaving writes.
//!
//! A file that cannot be parsed on open is logged and treated as empty; the
//! first successful write replaces it.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::RwLock;
use tracing::{info, warn};

use sitestate_core::{Error, Result, StorageArea};

use crate::entries::Entries;

/// Lock file name placed next to the data file
pub const LOCK_FILE_NAME: &str = ".lock";

/// File-backed storage area
#[derive(Debug)]
pub struct FileArea {
    path: PathBuf,
    entries: RwLock<Entries>,
    /// Held for its OS-level exclusive lock
    _lock: File,
}

impl FileArea {
    /// Open (or create) the area stored at `path`
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` if another process holds the directory lock,
    /// or `Io` if the directory or lock file cannot be created.
    pub fn open<P: AsRef<Path>>(path: P, quota: Option<usize>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let lock_path = dir.join(LOCK_FILE_NAME);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        lock.try_lock_exclusive().map_err(|_| {
            Error::access_denied(format!(
                "storage at '{}' is already in use by another process",
                dir.display()
            ))
        })?;

        let map = Self::read_map(&path);
        info!(
            target: "sitestate::storage",
            path = %path.display(),
            keys = map.len(),
            "Opened file-backed storage area"
        );

        Ok(Self {
            path,
            entries: RwLock::new(Entries::from_map(map, quota)),
            _lock: lock,
        })
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(
                    target: "sitestate::storage",
                    path = %path.display(),
                    error = %e,
                    "Failed to read storage file, starting empty"
                );
                return BTreeMap::new();
            }
        };
        if content.trim().is_empty() {
            return BTreeMap::new();
        }
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    target: "sitestate::storage",
                    path = %path.display(),
                    error = %e,
                    "Storage file is corrupt, starting empty"
                );
                BTreeMap::new()
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let bytes = serde_json::to_vec(entries.map())?;
        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `f` and persist, rolling back the in-memory state if either fails
    fn mutate<R>(&self, f: impl FnOnce(&mut Entries) -> Result<R>) -> Result<R> {
        let mut entries = self.entries.write();
        let before = entries.clone();
        let result = f(&mut *entries)?;
        if let Err(e) = self.persist(&*entries) {
            *entries = before;
            return Err(e);
        }
        Ok(result)
    }
}

impl StorageArea for FileArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| entries.put(key, value))
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        if self.entries.read().get(key).is_none() {
            return Ok(false);
        }
        self.mutate(|entries| Ok(entries.remove(key)))
    }

    fn clear(&self) -> Result<()> {
        self.mutate(|entries| {
            entries.clear();
            Ok(())
        })
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys()
    }
}
