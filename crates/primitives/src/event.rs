//! EventTracker: bounded analytics event log
//!
//! ## Design Principles
//!
//! 1. **Append-Only**: events are never edited after they are recorded.
//!
//! 2. **FIFO Bound**: the log under `analytics_events` keeps only the newest
//!    `retention` events (100 by default). When an append pushes it past the
//!    bound, the oldest events are dropped from the head. This is not LRU and
//!    not time-based expiry.
//!
//! 3. **Corruption Tolerant**: an absent or undecodable log starts over from
//!    empty rather than failing the append.
//!
//! ## Key Design
//!
//! - Namespace: persistent
//! - Key: `analytics_events`, a JSON array of [`AnalyticsEvent`]

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use sitestate_core::{keys, Clock, DEFAULT_EVENT_RETENTION};

use crate::store::{Outcome, StoreAdapter};

/// Event recorded when a page finishes loading
pub const PAGE_VIEW: &str = "page_view";
/// Event recorded with a load-time measurement
pub const PAGE_LOAD: &str = "page_load";
/// Event recorded when the page becomes hidden
pub const PAGE_HIDDEN: &str = "page_hidden";
/// Event recorded when the page becomes visible again
pub const PAGE_VISIBLE: &str = "page_visible";

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// One logged analytics event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `page_view`
    pub name: String,
    /// ISO-8601 time the event was recorded
    pub timestamp: String,
    /// Full path of the page the event happened on
    pub page: String,
    /// Arbitrary event payload
    #[serde(default = "empty_object")]
    pub data: Value,
}

/// Bounded, persistent analytics log
#[derive(Clone)]
pub struct EventTracker {
    store: StoreAdapter,
    clock: Arc<dyn Clock>,
    retention: usize,
}

impl EventTracker {
    /// Track events in `store` (the persistent namespace) with the default
    /// retention of 100
    pub fn new(store: StoreAdapter, clock: Arc<dyn Clock>) -> Self {
        Self::with_retention(store, clock, DEFAULT_EVENT_RETENTION)
    }

    /// Track events keeping at most `retention` of them
    pub fn with_retention(store: StoreAdapter, clock: Arc<dyn Clock>, retention: usize) -> Self {
        Self {
            store,
            clock,
            retention: retention.max(1),
        }
    }

    /// Maximum number of events kept
    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Append an event named `name` that happened on `page`
    ///
    /// `data` should be a JSON object; `Value::Null` is stored as `{}`.
    pub fn record_event(&self, page: &str, name: &str, data: Value) -> Outcome<()> {
        let event = AnalyticsEvent {
            name: name.to_string(),
            timestamp: self.clock.now().to_iso8601(),
            page: page.to_string(),
            data: if data.is_null() { empty_object() } else { data },
        };
        let retention = self.retention;

        let outcome = self.store.update(
            keys::ANALYTICS_EVENTS,
            |current: Option<Vec<AnalyticsEvent>>| {
                let mut events = current.unwrap_or_default();
                events.push(event);
                if events.len() > retention {
                    let excess = events.len() - retention;
                    events.drain(..excess);
                }
                let len = events.len();
                (events, len)
            },
        );

        debug!(
            target: "sitestate::event",
            name,
            page,
            stored = outcome.value,
            "Event tracked"
        );
        outcome.map(|_| ())
    }

    /// All retained events, oldest first
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.store
            .load::<Vec<AnalyticsEvent>>(keys::ANALYTICS_EVENTS)
            .into_value()
            .unwrap_or_default()
    }

    /// Retained events with the given name, oldest first
    pub fn events_named(&self, name: &str) -> Vec<AnalyticsEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events().len()
    }

    /// Whether no events are retained
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the whole log
    pub fn clear(&self) -> Outcome<bool> {
        self.store.remove(keys::ANALYTICS_EVENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitestate_core::{ErrorKind, ManualClock, Namespace, Timestamp};
    use sitestate_storage::MemoryArea;

    fn tracker() -> (EventTracker, StoreAdapter) {
        let store = StoreAdapter::new(Namespace::Persistent, Arc::new(MemoryArea::new()));
        let clock = Arc::new(ManualClock::new(Timestamp::from_millis(1_714_557_600_000)));
        (EventTracker::new(store.clone(), clock), store)
    }

    #[test]
    fn test_event_fields_are_recorded() {
        let (events, _store) = tracker();
        let outcome = events.record_event(
            "/courses.html",
            PAGE_VIEW,
            json!({"page": "/courses.html", "referrer": ""}),
        );
        assert!(outcome.is_ok());

        let stored = events.events();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "page_view");
        assert_eq!(stored[0].page, "/courses.html");
        assert_eq!(stored[0].timestamp, "2024-05-01T10:00:00.000Z");
        assert_eq!(stored[0].data["referrer"], "");
    }

    #[test]
    fn test_null_payload_becomes_empty_object() {
        let (events, _store) = tracker();
        let _ = events.record_event("/", PAGE_HIDDEN, Value::Null);
        assert_eq!(events.events()[0].data, json!({}));
    }

    #[test]
    fn test_101_events_evict_the_first() {
        let (events, _store) = tracker();
        for i in 1..=101 {
            let _ = events.record_event("/", "x", json!({ "call": i }));
        }
        let stored = events.events();
        assert_eq!(stored.len(), 100);
        assert_eq!(stored[0].data["call"], 2);
        assert_eq!(stored[99].data["call"], 101);
    }

    #[test]
    fn test_corrupt_log_starts_from_empty() {
        let (events, store) = tracker();
        let _ = store.save_text(keys::ANALYTICS_EVENTS, "<<garbage>>");
        let outcome = events.record_event("/", "x", json!({}));
        assert!(outcome.is_ok());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_non_array_log_starts_from_empty() {
        let (events, store) = tracker();
        let _ = store.save(keys::ANALYTICS_EVENTS, &json!({"not": "a list"}));
        let _ = events.record_event("/", "x", json!({}));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_events_named_filters() {
        let (events, _store) = tracker();
        let _ = events.record_event("/", PAGE_HIDDEN, json!({}));
        let _ = events.record_event("/", PAGE_VISIBLE, json!({}));
        let _ = events.record_event("/", PAGE_HIDDEN, json!({}));
        assert_eq!(events.events_named(PAGE_HIDDEN).len(), 2);
        assert_eq!(events.events_named(PAGE_VISIBLE).len(), 1);
    }

    #[test]
    fn test_custom_retention() {
        let store = StoreAdapter::new(Namespace::Persistent, Arc::new(MemoryArea::new()));
        let clock = Arc::new(ManualClock::new(Timestamp::from_millis(0)));
        let events = EventTracker::with_retention(store, clock, 3);
        for i in 0..5 {
            let _ = events.record_event("/", "x", json!({ "i": i }));
        }
        let kept: Vec<_> = events.events().iter().map(|e| e.data["i"].clone()).collect();
        assert_eq!(kept, vec![json!(2), json!(3), json!(4)]);
    }

    #[test]
    fn test_quota_failure_is_reported() {
        let store = StoreAdapter::new(
            Namespace::Persistent,
            Arc::new(MemoryArea::with_quota(Some(64))),
        );
        let clock = Arc::new(ManualClock::new(Timestamp::from_millis(0)));
        let events = EventTracker::new(store, clock);
        let outcome = events.record_event("/", "x", json!({"payload": "x".repeat(100)}));
        assert_eq!(outcome.error, Some(ErrorKind::Quota));
        assert!(events.is_empty());
    }
}
