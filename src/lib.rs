//! SiteState - visit, analytics and preference state for a static site
//!
//! Keeps the state a small multi-page site needs between page loads: the
//! visitor's theme, a per-session visit history and a bounded analytics log.
//!
//! # Quick Start
//!
//! ```ignore
//! use sitestate::{PageContext, Site, Theme};
//!
//! let site = Site::open("/data/site")?;
//!
//! let mut page = site.page(PageContext::new("/courses.html"));
//! let loaded = page.load();
//! println!("visit #{} in {} theme", loaded.visit_count, loaded.theme);
//!
//! page.load_measured(120);
//! page.unload();
//! ```
//!
//! # Architecture
//!
//! Storage areas (file or memory) sit under a typed [`StoreAdapter`]; the
//! trackers are stateless facades over it. [`Site`] binds them to the
//! persistent and transient namespaces.

pub use sitestate_engine::*;
