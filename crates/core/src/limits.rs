//! Retention and size limits
//!
//! Defaults mirror what a browser gives a single origin: about 5MB per
//! storage area, and the analytics log keeps the 100 most recent events.

/// Default number of analytics events retained
pub const DEFAULT_EVENT_RETENTION: usize = 100;

/// Default byte quota per namespace (5MB)
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Limits applied to a site's namespaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum analytics events kept (oldest evicted first)
    pub event_retention: usize,

    /// Byte quota per namespace, `None` for unbounded
    pub quota_bytes: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            event_retention: DEFAULT_EVENT_RETENTION,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl Limits {
    /// Bytes a key/value pair counts against the quota
    ///
    /// Browsers count both the key and the value.
    pub fn entry_size(key: &str, value: &str) -> usize {
        key.len() + value.len()
    }
}
