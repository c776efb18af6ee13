//! Per-session visit counting across page loads and sessions

use crate::common::*;

#[test]
fn fresh_session_counts_each_page_load() {
    let test = TestSite::new();
    let site = test.site();

    assert_eq!(site.page(PageContext::new("/index.html")).load().visit_count, 1);
    assert_eq!(site.page(PageContext::new("/courses.html")).load().visit_count, 2);

    let history = site.visits().history();
    let pages: Vec<&str> = history.iter().map(|v| v.page.as_str()).collect();
    assert_eq!(pages, vec!["index.html", "courses.html"]);
    assert_eq!(history[0].timestamp, "2024-05-01T10:00:00.000Z");
}

#[test]
fn root_path_is_recorded_as_index() {
    let test = TestSite::new();
    let _ = test.site().page(PageContext::new("/")).load();
    assert_eq!(test.site().visits().history()[0].page, "index.html");
}

#[test]
fn visit_count_is_mirrored_as_text() {
    let test = TestSite::new();
    let site = test.site();
    let _ = site.page(PageContext::new("/a.html")).load();
    let _ = site.page(PageContext::new("/b.html")).load();

    let raw = site.transient().load_text(keys::VISIT_COUNT).value;
    assert_eq!(raw.as_deref(), Some("2"));
}

#[test]
fn ending_session_resets_count() {
    let test = TestSite::new();
    let site = test.site();
    let _ = site.page(PageContext::new("/a.html")).load();
    let _ = site.page(PageContext::new("/b.html")).load();

    let before = site.session_id();
    let after = site.end_session();
    assert_ne!(before, after);
    assert!(site.last_session().is_none());
    assert_eq!(site.page(PageContext::new("/a.html")).load().visit_count, 1);
}

#[test]
fn visits_are_not_persisted_across_reopen() {
    let mut test = TestSite::new();
    let _ = test.site().page(PageContext::new("/a.html")).load();
    test.reopen();
    assert_eq!(test.site().visits().count(), 0);
    assert!(!test.persisted().contains_key(keys::PAGE_HISTORY));
}

#[test]
fn last_session_reflects_last_unload() {
    let test = TestSite::new();
    let site = test.site();

    let mut home = site.page(PageContext::new("/index.html"));
    let _ = home.load();
    let _ = home.unload();

    let mut contact = site.page(PageContext::new("/contact.html"));
    let _ = contact.load();
    test.clock.advance_millis(2_000);
    assert!(contact.unload().is_ok());

    let summary = site.last_session().unwrap();
    assert_eq!(summary.last_page, "/contact.html");
    assert_eq!(summary.visit_count, 2);
    assert_eq!(summary.timestamp, "2024-05-01T10:00:02.000Z");
}
