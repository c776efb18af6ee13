//! Site builder for fluent configuration
//!
//! ```ignore
//! use sitestate_engine::Site;
//!
//! // 1. Simple open, settings from sitestate.toml
//! let site = Site::open("/data/site")?;
//!
//! // 2. Builder with a fixed clock and explicit config
//! let site = Site::builder()
//!     .path("/data/site")
//!     .clock(Arc::new(ManualClock::new(start)))
//!     .config(SiteConfig::in_memory())
//!     .open()?;
//!
//! // 3. Ephemeral (no files, testing)
//! let site = Site::ephemeral();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use sitestate_core::{Clock, Error, Namespace, Result, StorageArea, SystemClock};
use sitestate_primitives::StoreAdapter;
use sitestate_storage::{FileArea, MemoryArea};

use super::config::{PersistentBackend, SiteConfig, CONFIG_FILE_NAME};
use super::Site;

/// Builder for [`Site`]
#[derive(Clone, Default)]
pub struct SiteBuilder {
    /// Data directory (required for `open()`)
    path: Option<PathBuf>,
    /// Clock override; system clock otherwise
    clock: Option<Arc<dyn Clock>>,
    /// Explicit config; read from `sitestate.toml` otherwise
    config: Option<SiteConfig>,
    /// Persistent area override, replacing the configured backend
    persistent_area: Option<Arc<dyn StorageArea>>,
}

impl std::fmt::Debug for SiteBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteBuilder")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .field("custom_area", &self.persistent_area.is_some())
            .finish()
    }
}

impl SiteBuilder {
    /// Create a builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Stamp records with `clock`
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use `config` instead of reading `sitestate.toml`
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Back the persistent namespace with `area`, ignoring the configured
    /// backend. Mostly useful for injecting failing areas in tests.
    pub fn persistent_area(mut self, area: Arc<dyn StorageArea>) -> Self {
        self.persistent_area = Some(area);
        self
    }

    /// Open the site
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No path was configured (use `.path()` or [`SiteBuilder::ephemeral`])
    /// - The config is invalid or cannot be read or written
    /// - The persistent data file is locked or unreadable
    pub fn open(self) -> Result<Site> {
        let data_dir = self.path.ok_or_else(|| {
            Error::invalid_input("SiteBuilder::open() requires a path. Use Site::ephemeral() for testing.")
        })?;
        std::fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                // Written back so a later plain open picks up the same settings
                config.write_to_file(&config_path)?;
                config
            }
            None => {
                SiteConfig::write_default_if_missing(&config_path)?;
                SiteConfig::from_file(&config_path)?
            }
        };

        let quota = config.limits().quota_bytes;
        let area: Arc<dyn StorageArea> = match self.persistent_area {
            Some(area) => area,
            None => match config.backend()? {
                PersistentBackend::File => Arc::new(FileArea::open(
                    data_dir.join(&config.persistent_file),
                    quota,
                )?),
                PersistentBackend::Memory => Arc::new(MemoryArea::with_quota(quota)),
            },
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let persistent = StoreAdapter::new(Namespace::Persistent, area);
        Ok(Site::from_parts(config, Some(data_dir), clock, persistent))
    }

    /// Build a site with no files: the persistent namespace is in memory
    /// unless an area was supplied. Any configured path is ignored.
    pub fn ephemeral(self) -> Site {
        let config = self.config.unwrap_or_else(SiteConfig::in_memory);
        let area = self
            .persistent_area
            .unwrap_or_else(|| Arc::new(MemoryArea::with_quota(config.limits().quota_bytes)));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Site::from_parts(
            config,
            None,
            clock,
            StoreAdapter::new(Namespace::Persistent, area),
        )
    }
}
