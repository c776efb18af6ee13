//! Core identity types: namespaces, sessions, pages and well-known keys

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Page name used when a path has no final segment (e.g. `/`)
pub const DEFAULT_PAGE: &str = "index.html";

/// Which key-value namespace an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Survives across sessions and restarts
    Persistent,
    /// Scoped to one browsing session
    Transient,
}

impl Namespace {
    /// Short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Persistent => "persistent",
            Namespace::Transient => "transient",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known storage keys
///
/// Each feature owns exactly one key so features never collide.
pub mod keys {
    /// Persistent: `"light"` or `"dark"`, stored as bare text
    pub const THEME: &str = "theme";
    /// Persistent: JSON array of analytics events
    pub const ANALYTICS_EVENTS: &str = "analytics_events";
    /// Persistent: JSON `{latitude, longitude}`
    pub const USER_LOCATION: &str = "user_location";
    /// Persistent: last accepted contact email, bare text
    pub const EMAIL: &str = "email";
    /// Transient: JSON array of visit records
    pub const PAGE_HISTORY: &str = "page_history";
    /// Transient: decimal visit count
    pub const VISIT_COUNT: &str = "visit_count";
    /// Transient: JSON session summary written on unload
    pub const LAST_SESSION: &str = "last_session";
}

/// Identifier of one transient session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session id
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the current page lives, as reported by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Full URL path, e.g. `/site/courses.html`
    pub path: String,
    /// Referrer URL, empty when there is none
    #[serde(default)]
    pub referrer: String,
}

impl PageContext {
    /// Context for `path` with no referrer
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            referrer: String::new(),
        }
    }

    /// Attach a referrer
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    /// Logical page name: the last path segment, or [`DEFAULT_PAGE`]
    pub fn page_name(&self) -> String {
        page_name(&self.path)
    }
}

/// Last segment of a URL path, or [`DEFAULT_PAGE`] when it is empty
pub fn page_name(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => DEFAULT_PAGE.to_string(),
    }
}
