//! Contained failures: denied storage, quota and locked directories

use std::sync::Arc;

use serde_json::json;

use crate::common::*;
use sitestate_storage::testing::{DeniedArea, FailingWritesArea};

#[test]
fn denied_persistent_storage_is_contained() {
    init_logging();
    let site = Site::builder().persistent_area(Arc::new(DeniedArea)).ephemeral();

    let mut page = site.page(PageContext::new("/index.html"));
    let loaded = page.load();
    assert_eq!(loaded.theme, Theme::Light);
    assert_eq!(loaded.visit_count, 1);

    let toggled = page.toggle_theme();
    assert_eq!(toggled.value, Theme::Dark);
    assert_eq!(toggled.error, Some(ErrorKind::Access));
    assert_eq!(page.theme(), Theme::Dark);

    let tracked = site.events().record_event("/", "x", json!({}));
    assert_eq!(tracked.error, Some(ErrorKind::Access));
    assert!(site.events().is_empty());
}

#[test]
fn failed_write_keeps_previous_theme() {
    init_logging();
    let area = FailingWritesArea::with_items([(keys::THEME, "dark")]);
    let site = Site::builder().persistent_area(Arc::new(area)).ephemeral();

    let saved = site.preferences().set_preference(Theme::Light);
    assert!(!saved.value);
    assert_eq!(site.preferences().load_preference(), Theme::Dark);
}

#[test]
fn quota_rejects_oversized_value() {
    init_logging();
    let config = SiteConfig {
        quota_bytes: 64,
        ..SiteConfig::in_memory()
    };
    let site = Site::builder().config(config).ephemeral();
    let store = site.persistent();

    assert!(store.save("note", "short").value);
    let big = "x".repeat(128);
    let saved = store.save("note", &big);
    assert!(!saved.value);
    assert_eq!(saved.error, Some(ErrorKind::Quota));
    assert_eq!(store.load::<String>("note").value.as_deref(), Some("short"));
}

#[test]
fn second_open_of_same_directory_is_refused() {
    let test = TestSite::new();
    let err = Site::open(test.dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Access);
}

#[test]
fn contact_submission_is_remembered() {
    let mut test = TestSite::new();
    let submission = sitestate::ContactSubmission {
        name: "Asha Rao".to_string(),
        email: "asha@sjcit.ac.in".to_string(),
        phone: "9876543210".to_string(),
    };
    test.site().contact_form().submit(&submission).unwrap();
    test.reopen();

    assert_eq!(
        test.site().contact_form().last_email().as_deref(),
        Some("asha@sjcit.ac.in")
    );
}
