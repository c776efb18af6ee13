//! Core types and traits for SiteState
//!
//! This crate defines the foundational types used throughout the system:
//! - Namespace: persistent vs transient key-value namespace
//! - SessionId / PageContext: identity of the session and the current page
//! - keys: the well-known storage keys, one per feature
//! - Timestamp / Clock: ISO-8601 time and an injectable clock
//! - Limits: event retention and per-namespace byte quota
//! - Error / ErrorKind: error type hierarchy
//! - StorageArea: the trait every storage backend implements

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod timestamp;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use limits::{Limits, DEFAULT_EVENT_RETENTION, DEFAULT_QUOTA_BYTES};
pub use timestamp::{Clock, ManualClock, SystemClock, Timestamp};
pub use traits::StorageArea;
pub use types::{keys, page_name, Namespace, PageContext, SessionId, DEFAULT_PAGE};
