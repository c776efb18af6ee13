//! Session summary written when a page unloads

use serde::{Deserialize, Serialize};

use sitestate_core::keys;

use crate::store::{Outcome, StoreAdapter};

/// Snapshot of the session at the last unload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Full path of the page being left
    pub last_page: String,
    /// ISO-8601 time of the unload
    pub timestamp: String,
    /// Visits recorded so far this session
    pub visit_count: usize,
}

impl SessionSummary {
    /// Write this summary to `last_session` in `store` (transient namespace)
    pub fn write(&self, store: &StoreAdapter) -> Outcome<bool> {
        store.save(keys::LAST_SESSION, self)
    }

    /// Read the last written summary, if any
    pub fn read(store: &StoreAdapter) -> Option<SessionSummary> {
        store.load(keys::LAST_SESSION).into_value()
    }
}
