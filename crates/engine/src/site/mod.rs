//! Site: the two namespaces plus the clock, opened from a data directory
//!
//! A `Site` owns:
//! - the persistent namespace (file-backed by default, see [`SiteConfig`])
//! - the transient session namespace, emptied by [`Site::end_session`]
//! - the clock every record is stamped with
//!
//! Primitives are handed out as cheap facades over these namespaces, and
//! [`Site::page`] starts a [`PageSession`] that drives the page lifecycle.
//!
//! The transient namespace keeps its identity across sessions: ending a
//! session empties it and assigns a new [`SessionId`]. A tracker taken before
//! `end_session` therefore records into the new session, never into a
//! detached store.

mod builder;
pub mod config;
mod page;

pub use builder::SiteBuilder;
pub use config::{PersistentBackend, SiteConfig, CONFIG_FILE_NAME, DEFAULT_PERSISTENT_FILE};
pub use page::{PageLoad, PageSession};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use sitestate_core::{keys, Clock, Namespace, PageContext, Result, SessionId};
use sitestate_primitives::{
    ContactForm, EventTracker, LocationStore, PreferenceStore, SessionSummary, StoreAdapter,
    VisitTracker,
};
use sitestate_storage::MemoryArea;

/// Visit, analytics and preference state for one site
pub struct Site {
    config: SiteConfig,
    data_dir: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    persistent: StoreAdapter,
    transient: StoreAdapter,
    session: RwLock<SessionId>,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("config", &self.config)
            .field("data_dir", &self.data_dir)
            .field("persistent", &self.persistent)
            .field("transient", &self.transient)
            .field("session", &*self.session.read())
            .finish()
    }
}

impl Site {
    /// Open the site stored in `path`, creating it and a default
    /// `sitestate.toml` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or config cannot be created or read,
    /// or if the persistent data file is locked by another process.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        SiteBuilder::new().path(path.as_ref()).open()
    }

    /// Open the site stored in `path` with an explicit configuration.
    ///
    /// The supplied config is written to `sitestate.toml` so that a later
    /// [`Site::open`] picks up the same settings.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: SiteConfig) -> Result<Self> {
        SiteBuilder::new().path(path.as_ref()).config(config).open()
    }

    /// A site with both namespaces in memory and the system clock.
    pub fn ephemeral() -> Self {
        SiteBuilder::new().ephemeral()
    }

    /// Start configuring a site
    pub fn builder() -> SiteBuilder {
        SiteBuilder::new()
    }

    pub(crate) fn from_parts(
        config: SiteConfig,
        data_dir: Option<PathBuf>,
        clock: Arc<dyn Clock>,
        persistent: StoreAdapter,
    ) -> Self {
        let transient = StoreAdapter::new(
            Namespace::Transient,
            Arc::new(MemoryArea::with_quota(config.limits().quota_bytes)),
        );
        let session = SessionId::new();
        info!(
            target: "sitestate::site",
            data_dir = ?data_dir,
            %session,
            "Site opened"
        );
        Self {
            config,
            data_dir,
            clock,
            persistent,
            transient,
            session: RwLock::new(session),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Data directory, `None` for ephemeral sites
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Clock used to stamp records
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Id of the current session
    pub fn session_id(&self) -> SessionId {
        *self.session.read()
    }

    /// The persistent namespace
    pub fn persistent(&self) -> &StoreAdapter {
        &self.persistent
    }

    /// The transient namespace, holding the current session's state
    pub fn transient(&self) -> &StoreAdapter {
        &self.transient
    }

    /// Theme preference over the persistent namespace
    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(self.persistent.clone())
    }

    /// Visit tracker over the transient namespace
    ///
    /// The tracker follows the site across [`Site::end_session`]: visits it
    /// records afterwards count toward the new session.
    pub fn visits(&self) -> VisitTracker {
        VisitTracker::new(self.transient.clone(), Arc::clone(&self.clock))
    }

    /// Analytics log over the persistent namespace
    pub fn events(&self) -> EventTracker {
        EventTracker::with_retention(
            self.persistent.clone(),
            Arc::clone(&self.clock),
            self.config.event_retention,
        )
    }

    /// Location store over the persistent namespace
    pub fn locations(&self) -> LocationStore {
        LocationStore::new(self.persistent.clone())
    }

    /// Contact form over the persistent namespace
    pub fn contact_form(&self) -> ContactForm {
        ContactForm::new(self.persistent.clone())
    }

    /// Summary written by the last page unload of this session
    pub fn last_session(&self) -> Option<SessionSummary> {
        SessionSummary::read(&self.transient)
    }

    /// Begin the lifecycle of the page at `context`
    pub fn page(&self, context: PageContext) -> PageSession<'_> {
        PageSession::new(self, context)
    }

    /// End the current session, emptying the transient namespace, and
    /// start a fresh one. Returns the new session id.
    pub fn end_session(&self) -> SessionId {
        let mut session = self.session.write();
        let ended = *session;
        *session = SessionId::new();
        // Holding the history lock keeps an in-flight visit wholly in one session
        let _ = self
            .transient
            .with_key_lock(keys::PAGE_HISTORY, || self.transient.clear());
        info!(
            target: "sitestate::site",
            %ended,
            started = %*session,
            "Session ended"
        );
        *session
    }
}
