//! Theme preference persistence

use crate::common::*;

#[test]
fn preference_survives_reopen() {
    let mut test = TestSite::new();
    assert!(test.site().preferences().set_preference(Theme::Dark).value);
    test.reopen();

    assert_eq!(test.site().preferences().load_preference(), Theme::Dark);
    assert_eq!(test.persisted()[keys::THEME], "dark");
}

#[test]
fn toggled_theme_is_applied_on_next_load() {
    let mut test = TestSite::new();
    {
        let mut page = test.site().page(PageContext::new("/index.html"));
        assert_eq!(page.load().theme, Theme::Light);
        assert_eq!(page.toggle_theme().value, Theme::Dark);
    }
    test.reopen();

    let mut page = test.site().page(PageContext::new("/courses.html"));
    assert_eq!(page.load().theme, Theme::Dark);
}

#[test]
fn unknown_saved_theme_reads_as_light() {
    let test = TestSite::with_persistent_items(&[(keys::THEME, "purple")]);
    assert_eq!(test.site().preferences().load_preference(), Theme::Light);
}
