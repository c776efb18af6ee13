//! Persistent analytics log: lifecycle events, retention and corruption

use serde_json::json;

use crate::common::*;
use sitestate::{PAGE_HIDDEN, PAGE_LOAD, PAGE_VIEW, PAGE_VISIBLE};

#[test]
fn page_lifecycle_tracks_events_in_order() {
    let test = TestSite::new();
    let site = test.site();

    let mut page = site.page(PageContext::new("/about.html").with_referrer("/index.html"));
    let _ = page.load();
    let _ = page.load_measured(250);
    let _ = page.visibility_changed(true);
    let _ = page.visibility_changed(false);

    let names: Vec<String> = site.events().events().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec![PAGE_VIEW, PAGE_LOAD, PAGE_HIDDEN, PAGE_VISIBLE]);

    let view = &site.events().events_named(PAGE_VIEW)[0];
    assert_eq!(view.page, "/about.html");
    assert_eq!(view.data, json!({ "page": "/about.html", "referrer": "/index.html" }));
    assert_eq!(view.timestamp, "2024-05-01T10:00:00.000Z");

    let hidden = &site.events().events_named(PAGE_HIDDEN)[0];
    assert_eq!(hidden.data, json!({}));
}

#[test]
fn log_keeps_newest_hundred() {
    let test = TestSite::new();
    let events = test.site().events();
    for seq in 1..=101 {
        assert!(events.record_event("/", "click", json!({ "seq": seq })).is_ok());
    }

    let stored = events.events();
    assert_eq!(stored.len(), 100);
    assert_eq!(stored[0].data["seq"], 2);
    assert_eq!(stored[99].data["seq"], 101);
}

#[test]
fn configured_retention_is_honoured() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = SiteConfig {
        event_retention: 3,
        ..SiteConfig::default()
    };
    let site = Site::open_with_config(dir.path(), config).unwrap();
    for seq in 0..5 {
        let _ = site.events().record_event("/", "x", json!({ "seq": seq }));
    }
    let stored = site.events().events();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].data["seq"], 2);
}

#[test]
fn events_survive_reopen() {
    let mut test = TestSite::new();
    let _ = test.site().page(PageContext::new("/index.html")).load();
    test.reopen();

    let events = test.site().events().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, PAGE_VIEW);
    assert!(test.persisted().contains_key(keys::ANALYTICS_EVENTS));
}

#[test]
fn corrupt_log_restarts_from_empty() {
    let test = TestSite::with_persistent_items(&[(keys::ANALYTICS_EVENTS, "{not json")]);
    let events = test.site().events();

    assert!(events.is_empty());
    assert!(events.record_event("/", "x", json!({})).is_ok());
    assert_eq!(events.len(), 1);
}
