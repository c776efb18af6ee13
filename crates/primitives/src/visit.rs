//! VisitTracker: per-session page visit history
//!
//! ## Design
//!
//! Each page load appends one [`VisitRecord`] to the JSON array under
//! `page_history` in the transient namespace, then mirrors the new length to
//! `visit_count` as a decimal string. Records are never edited or removed one
//! at a time; only the whole history can be cleared.
//!
//! The load-append-save holds the key lock, so the stored length always equals
//! the number of completed `record_visit` calls in the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sitestate_core::{keys, Clock};

use crate::store::{Outcome, StoreAdapter};

/// One logged page visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Logical page name, e.g. `courses.html`
    pub page: String,
    /// ISO-8601 time of the visit
    pub timestamp: String,
}

/// Session visit history
#[derive(Clone)]
pub struct VisitTracker {
    store: StoreAdapter,
    clock: Arc<dyn Clock>,
}

impl VisitTracker {
    /// Track visits in `store` (the transient namespace)
    pub fn new(store: StoreAdapter, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Append a visit to `page` and return the session's visit count
    ///
    /// An absent or undecodable history starts from empty.
    pub fn record_visit(&self, page: &str) -> Outcome<usize> {
        let record = VisitRecord {
            page: page.to_string(),
            timestamp: self.clock.now().to_iso8601(),
        };

        // The count mirror is written before the history lock is released so
        // `visit_count` never trails `page_history`
        self.store.update_then(
            keys::PAGE_HISTORY,
            |current: Option<Vec<VisitRecord>>| {
                let mut history = current.unwrap_or_default();
                history.push(record);
                let count = history.len();
                (history, count)
            },
            |outcome| {
                if !outcome.is_ok() {
                    return outcome;
                }
                let count = outcome.value;
                let mirrored = self.store.save_text(keys::VISIT_COUNT, &count.to_string());
                debug!(target: "sitestate::visit", page, count, "Page visit recorded");
                match mirrored.error {
                    Some(kind) => Outcome::failed(count, kind),
                    None => outcome,
                }
            },
        )
    }

    /// All visits this session, oldest first
    pub fn history(&self) -> Vec<VisitRecord> {
        self.store
            .load::<Vec<VisitRecord>>(keys::PAGE_HISTORY)
            .into_value()
            .unwrap_or_default()
    }

    /// Number of visits this session
    pub fn count(&self) -> usize {
        self.history().len()
    }

    /// Forget the session's visit history
    pub fn clear(&self) -> Outcome<bool> {
        let history = self.store.remove(keys::PAGE_HISTORY);
        let count = self.store.remove(keys::VISIT_COUNT);
        match history.error.or(count.error) {
            None => Outcome::ok(true),
            Some(kind) => Outcome::failed(false, kind),
        }
    }
}
