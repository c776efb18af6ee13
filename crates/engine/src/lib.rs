//! Page lifecycle engine for SiteState
//!
//! This crate wires the lower layers together:
//! - Site: data directory, config, persistent and transient namespaces
//! - PageSession: load, visibility, load timing and unload of one page
//! - Session management: `end_session` replaces the transient namespace
//!
//! The engine is the only component that knows about:
//! - Where the persistent namespace lives (`sitestate.toml`)
//! - Which namespace each primitive is bound to

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod site;

pub use site::{
    PageLoad, PageSession, PersistentBackend, Site, SiteBuilder, SiteConfig, CONFIG_FILE_NAME,
    DEFAULT_PERSISTENT_FILE,
};

pub use sitestate_core::{
    keys, page_name, Clock, Error, ErrorKind, Limits, ManualClock, Namespace, PageContext, Result,
    SessionId, StorageArea, SystemClock, Timestamp,
};
pub use sitestate_primitives::{
    AnalyticsEvent, ContactError, ContactForm, ContactSubmission, EventTracker, Location,
    LocationStore, Outcome, PreferenceStore, SessionSummary, StoreAdapter, Theme, ThemeState,
    VisitRecord, VisitTracker, PAGE_HIDDEN, PAGE_LOAD, PAGE_VIEW, PAGE_VISIBLE,
};
pub use sitestate_storage::{FileArea, MemoryArea};
