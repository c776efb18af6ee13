//! Site configuration via `sitestate.toml`
//!
//! On first open, a default `sitestate.toml` is created in the data
//! directory. To change settings, edit the file and reopen the site.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sitestate_core::{Error, Limits, Result, DEFAULT_EVENT_RETENTION, DEFAULT_QUOTA_BYTES};
use sitestate_storage::file::LOCK_FILE_NAME;

/// Config file name placed in the site data directory.
pub const CONFIG_FILE_NAME: &str = "sitestate.toml";

/// Default name of the persistent namespace's data file.
pub const DEFAULT_PERSISTENT_FILE: &str = "local_storage.json";

/// Where the persistent namespace lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistentBackend {
    /// JSON file in the data directory; survives restarts
    File,
    /// In memory; lost when the site is dropped
    Memory,
}

/// Site configuration loaded from `sitestate.toml`.
///
/// # Example
///
/// ```toml
/// persistent_backend = "file"
/// persistent_file = "local_storage.json"
/// event_retention = 100
/// quota_bytes = 5242880
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Persistent backend: `"file"` or `"memory"`.
    #[serde(default = "default_backend_str")]
    pub persistent_backend: String,
    /// Data file name for the `"file"` backend, relative to the data directory.
    #[serde(default = "default_persistent_file")]
    pub persistent_file: String,
    /// Number of analytics events retained.
    #[serde(default = "default_event_retention")]
    pub event_retention: usize,
    /// Byte quota per namespace; 0 disables the quota.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

fn default_backend_str() -> String {
    "file".to_string()
}

fn default_persistent_file() -> String {
    DEFAULT_PERSISTENT_FILE.to_string()
}

fn default_event_retention() -> usize {
    DEFAULT_EVENT_RETENTION
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            persistent_backend: default_backend_str(),
            persistent_file: default_persistent_file(),
            event_retention: default_event_retention(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl SiteConfig {
    /// Config for a site that keeps everything in memory
    pub fn in_memory() -> Self {
        Self {
            persistent_backend: "memory".to_string(),
            ..Self::default()
        }
    }

    /// Parse the backend string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"file"` or `"memory"`.
    pub fn backend(&self) -> Result<PersistentBackend> {
        match self.persistent_backend.as_str() {
            "file" => Ok(PersistentBackend::File),
            "memory" => Ok(PersistentBackend::Memory),
            other => Err(Error::config(format!(
                "Invalid persistent_backend '{}' in {}. Expected \"file\" or \"memory\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown backend, a zero retention, or a data
    /// file name that is empty, nested, `.`/`..`, or one of the names the
    /// site already uses (`sitestate.toml`, `.lock`).
    pub fn validate(&self) -> Result<()> {
        self.backend()?;
        if self.event_retention == 0 {
            return Err(Error::config("event_retention must be at least 1"));
        }
        let name = self.persistent_file.as_str();
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || matches!(name, "." | ".." | CONFIG_FILE_NAME | LOCK_FILE_NAME)
        {
            return Err(Error::config(format!(
                "persistent_file '{}' must be a plain file name",
                self.persistent_file
            )));
        }
        Ok(())
    }

    /// Limits derived from this config
    pub fn limits(&self) -> Limits {
        Limits {
            event_retention: self.event_retention,
            quota_bytes: (self.quota_bytes > 0).then_some(self.quota_bytes),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# SiteState configuration
#
# Persistent namespace backend: "file" (default) or "memory"
#   "file"   = JSON file in this directory, survives restarts
#   "memory" = kept in memory, lost when the site is closed
persistent_backend = "file"

# Data file for the "file" backend
persistent_file = "local_storage.json"

# Analytics events retained; the oldest are dropped first
event_retention = 100

# Byte quota per namespace (keys + values); 0 disables the quota
quota_bytes = 5242880
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
