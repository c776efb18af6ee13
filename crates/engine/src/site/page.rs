//! PageSession: one page's lifecycle against a [`Site`]
//!
//! Callers drive the lifecycle explicitly:
//!
//! 1. [`PageSession::load`] applies the saved theme, records the visit and
//!    tracks `page_view`
//! 2. [`PageSession::load_measured`] and [`PageSession::visibility_changed`]
//!    track `page_load`, `page_hidden` and `page_visible`
//! 3. [`PageSession::unload`] writes the session summary
//!
//! Failures in any step are contained: they are logged and reported through
//! [`Outcome`], never returned as errors.

use serde_json::json;
use tracing::{info, warn};

use sitestate_core::PageContext;
use sitestate_primitives::{
    Outcome, SessionSummary, Theme, ThemeState, PAGE_HIDDEN, PAGE_LOAD, PAGE_VIEW, PAGE_VISIBLE,
};

use super::Site;

/// State applied when a page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLoad {
    /// Theme to render with
    pub theme: Theme,
    /// Visits this session, including this one
    pub visit_count: usize,
}

/// A page being shown by the presentation layer
#[derive(Debug)]
pub struct PageSession<'a> {
    site: &'a Site,
    context: PageContext,
    theme: ThemeState,
    visit_count: usize,
}

impl<'a> PageSession<'a> {
    pub(crate) fn new(site: &'a Site, context: PageContext) -> Self {
        Self {
            site,
            context,
            theme: ThemeState::default(),
            visit_count: 0,
        }
    }

    /// Where this page lives
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// The applied theme
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Visit count seen at load; 0 before [`PageSession::load`]
    pub fn visit_count(&self) -> usize {
        self.visit_count
    }

    /// Run the load sequence: apply the saved theme, record the visit,
    /// then track `page_view` with the path and referrer.
    pub fn load(&mut self) -> PageLoad {
        self.theme = ThemeState::new(self.site.preferences().load_preference());

        let visited = self.site.visits().record_visit(&self.context.page_name());
        if let Some(kind) = visited.error {
            warn!(target: "sitestate::site", path = %self.context.path, ?kind, "Visit not recorded");
        }
        self.visit_count = visited.value;
        info!(
            target: "sitestate::site",
            count = self.visit_count,
            "Page visits this session"
        );

        let _ = self.track(
            PAGE_VIEW,
            json!({
                "page": self.context.path,
                "referrer": self.context.referrer,
            }),
        );

        PageLoad {
            theme: self.theme.current(),
            visit_count: self.visit_count,
        }
    }

    /// Flip and persist the theme. The flipped theme stays applied even if
    /// saving it failed.
    pub fn toggle_theme(&mut self) -> Outcome<Theme> {
        let outcome = self.site.preferences().toggle(self.theme.current());
        self.theme = ThemeState::new(outcome.value);
        outcome
    }

    /// Track `page_hidden` or `page_visible`
    pub fn visibility_changed(&self, hidden: bool) -> Outcome<()> {
        let name = if hidden { PAGE_HIDDEN } else { PAGE_VISIBLE };
        self.track(name, json!({}))
    }

    /// Track `page_load` with the measured load time in milliseconds
    pub fn load_measured(&self, load_time_ms: u64) -> Outcome<()> {
        info!(target: "sitestate::site", load_time_ms, "Page load time");
        self.track(
            PAGE_LOAD,
            json!({
                "loadTime": load_time_ms,
                "page": self.context.path,
            }),
        )
    }

    /// Write the `last_session` summary and end this page
    pub fn unload(self) -> Outcome<SessionSummary> {
        let summary = SessionSummary {
            last_page: self.context.path.clone(),
            timestamp: self.site.clock().now().to_iso8601(),
            visit_count: self.visit_count,
        };
        let written = summary.write(self.site.transient());
        written.map(|_| summary)
    }

    fn track(&self, name: &str, data: serde_json::Value) -> Outcome<()> {
        self.site.events().record_event(&self.context.path, name, data)
    }
}
