//! End-to-end tests of the page lifecycle against a real data directory

#[path = "../common/mod.rs"]
mod common;

mod analytics;
mod failures;
mod preferences;
mod visits;
