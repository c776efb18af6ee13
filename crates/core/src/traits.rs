//! Core trait for key-value storage areas
//!
//! A [`StorageArea`] is one flat string-to-string namespace, the shape of a
//! browser's `localStorage` or `sessionStorage`. Backends live in
//! `sitestate-storage`; everything above only sees this trait, so backends can
//! be swapped without touching the trackers.

use crate::error::Result;

/// Object-safe string key/value storage area
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Each call touches at most one key,
/// except `clear`.
pub trait StorageArea: Send + Sync {
    /// Get the text stored under `key`
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if the write would exceed the area's quota
    /// (the previous value is kept), or an access error.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`
    ///
    /// Returns `true` if the key existed. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be written.
    fn remove_item(&self, key: &str) -> Result<bool>;

    /// Remove every key
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be written.
    fn clear(&self) -> Result<()>;

    /// Number of keys
    fn len(&self) -> usize;

    /// Whether the area holds no keys
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys, sorted
    fn keys(&self) -> Vec<String>;
}
