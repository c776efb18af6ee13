//! Primitives layer for SiteState
//!
//! Provides the site's state features as stateless facades over a
//! [`StoreAdapter`]:
//! - **StoreAdapter**: typed JSON save/load/remove/clear with failure containment
//! - **VisitTracker**: per-session page visit history and count
//! - **EventTracker**: persistent analytics log bounded to the newest 100 events
//! - **PreferenceStore**: the persisted light/dark theme
//! - **SessionSummary**: snapshot written when a page unloads
//! - **LocationStore** / **ContactForm**: smaller single-key features
//!
//! ## Design Principle: Stateless Facades
//!
//! Every primitive holds only a `StoreAdapter` (and a clock where it stamps
//! records). All state lives in the storage areas, so:
//!
//! - Multiple primitive instances over the same adapter are safe
//! - A reopened site sees exactly what was persisted
//! - There are no module-level globals
//!
//! ## Key Ownership
//!
//! Each feature owns one key (see `sitestate_core::keys`). Nothing enforces
//! this beyond convention.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contact;
pub mod event;
pub mod location;
pub mod preference;
pub mod session;
pub mod store;
pub mod visit;

pub use contact::{
    validate_email, validate_name, validate_phone, validate_required, ContactError, ContactForm,
    ContactSubmission,
};
pub use event::{AnalyticsEvent, EventTracker, PAGE_HIDDEN, PAGE_LOAD, PAGE_VIEW, PAGE_VISIBLE};
pub use location::{Location, LocationStore};
pub use preference::{PreferenceStore, Theme, ThemeState};
pub use session::SessionSummary;
pub use store::{Outcome, StoreAdapter};
pub use visit::{VisitRecord, VisitTracker};
