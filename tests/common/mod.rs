//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use sitestate::{
    keys, ErrorKind, ManualClock, PageContext, Site, SiteConfig, Theme, Timestamp,
    DEFAULT_PERSISTENT_FILE,
};
use tempfile::TempDir;

/// 2024-05-01T10:00:00.000Z
pub const START_MILLIS: i64 = 1_714_557_600_000;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Timestamp::from_millis(START_MILLIS)))
}

// ============================================================================
// TestSite - site in a temporary data directory
// ============================================================================

/// A file-backed site that can be closed and reopened in the same directory
pub struct TestSite {
    pub site: Option<Site>,
    pub clock: Arc<ManualClock>,
    pub dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        init_logging();
        let dir = TempDir::new().expect("create temp dir");
        let clock = manual_clock();
        let site = open_at(dir.path(), &clock);
        Self {
            site: Some(site),
            clock,
            dir,
        }
    }

    /// Seed the persistent data file before the first open
    pub fn with_persistent_items(items: &[(&str, &str)]) -> Self {
        init_logging();
        let dir = TempDir::new().expect("create temp dir");
        write_items(&dir.path().join(DEFAULT_PERSISTENT_FILE), items);
        let clock = manual_clock();
        let site = open_at(dir.path(), &clock);
        Self {
            site: Some(site),
            clock,
            dir,
        }
    }

    pub fn site(&self) -> &Site {
        self.site.as_ref().expect("site is open")
    }

    /// Drop the site, releasing its lock, and open the directory again
    pub fn reopen(&mut self) {
        self.site = None;
        self.site = Some(open_at(self.dir.path(), &self.clock));
    }

    pub fn data_file(&self) -> std::path::PathBuf {
        self.dir.path().join(DEFAULT_PERSISTENT_FILE)
    }

    /// Parsed content of the persistent data file
    pub fn persisted(&self) -> serde_json::Map<String, serde_json::Value> {
        let raw = fs::read_to_string(self.data_file()).expect("read data file");
        serde_json::from_str(&raw).expect("data file is a JSON object")
    }
}

fn open_at(dir: &Path, clock: &Arc<ManualClock>) -> Site {
    Site::builder()
        .path(dir)
        .clock(clock.clone())
        .open()
        .expect("open site")
}

fn write_items(path: &Path, items: &[(&str, &str)]) {
    let map: serde_json::Map<String, serde_json::Value> = items
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    fs::write(path, serde_json::to_string(&map).expect("encode items")).expect("seed data file");
}
