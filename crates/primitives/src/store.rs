//! StoreAdapter: typed JSON access to one storage namespace
//!
//! ## Design
//!
//! StoreAdapter is a thin facade over a [`StorageArea`]. It holds no state
//! beyond the area handle and the per-key lock table, so clones share both.
//!
//! ## Failure Containment
//!
//! The contract methods (`save`, `load`, `remove`, `clear`, `update`) never
//! return `Err`. Encoding, quota and access failures are logged at `warn`
//! and turned into an [`Outcome`] carrying a safe default plus the
//! [`ErrorKind`]. The `try_*` variants return the underlying [`Error`] for
//! callers that want it.
//!
//! ## Missing vs Corrupt
//!
//! A missing key (or an empty stored string) loads as `None` with no error.
//! Text that does not decode loads as `None` with `ErrorKind::Serialization`.
//!
//! ## Thread Safety
//!
//! Writes and read-modify-write sequences on the same key are serialized
//! through [`KeyLocks`]; two concurrent `update`s never lose an append.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use sitestate_core::{Error, ErrorKind, Namespace, Result, StorageArea};
use sitestate_storage::KeyLocks;

/// Result of a contained store operation
///
/// `value` is always usable: on failure it holds the safe default
/// (`false`, `None`, ...). `error` says what went wrong, if anything.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Outcome<T> {
    /// The result, or a safe default on failure
    pub value: T,
    /// Failure classification, `None` on success
    pub error: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    /// A successful outcome
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// A failed outcome carrying a fallback value
    pub fn failed(value: T, kind: ErrorKind) -> Self {
        Self {
            value,
            error: Some(kind),
        }
    }

    /// Whether the operation succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the error and keep the value
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the error
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            error: self.error,
        }
    }
}

/// Typed JSON access to one namespace
#[derive(Clone)]
pub struct StoreAdapter {
    namespace: Namespace,
    area: Arc<dyn StorageArea>,
    locks: Arc<KeyLocks>,
}

impl std::fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter")
            .field("namespace", &self.namespace)
            .field("keys", &self.area.len())
            .finish()
    }
}

impl StoreAdapter {
    /// Wrap `area` as `namespace`
    pub fn new(namespace: Namespace, area: Arc<dyn StorageArea>) -> Self {
        Self {
            namespace,
            area,
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// Which namespace this adapter serves
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Number of keys in the namespace
    pub fn len(&self) -> usize {
        self.area.len()
    }

    /// Whether the namespace is empty
    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }

    /// All keys in the namespace, sorted
    pub fn keys(&self) -> Vec<String> {
        self.area.keys()
    }

    fn log_failure(&self, op: &str, key: Option<&str>, err: &Error) {
        warn!(
            target: "sitestate::store",
            namespace = %self.namespace,
            op,
            key = key.unwrap_or("*"),
            error = %err,
            "Storage {} error", op
        );
    }

    // ========== Fallible API ==========

    /// Encode `value` as JSON and store it under `key`
    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.locks.with_lock(key, || self.area.set_item(key, &text))
    }

    /// Load and decode the JSON stored under `key`
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.area.get_item(key)? {
            Some(text) if !text.is_empty() => Ok(Some(serde_json::from_str(&text)?)),
            _ => Ok(None),
        }
    }

    /// Remove `key`, returning whether it existed
    pub fn try_remove(&self, key: &str) -> Result<bool> {
        self.locks.with_lock(key, || self.area.remove_item(key))
    }

    /// Remove every key in the namespace
    pub fn try_clear(&self) -> Result<()> {
        self.area.clear()
    }

    // ========== Contained API ==========

    /// Save `value` under `key`; `true` on success
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Outcome<bool> {
        match self.try_save(key, value) {
            Ok(()) => Outcome::ok(true),
            Err(e) => {
                self.log_failure("save", Some(key), &e);
                Outcome::failed(false, e.kind())
            }
        }
    }

    /// Load the value under `key`; `None` if missing or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Outcome<Option<T>> {
        match self.try_load(key) {
            Ok(value) => Outcome::ok(value),
            Err(e) => {
                self.log_failure("load", Some(key), &e);
                Outcome::failed(None, e.kind())
            }
        }
    }

    /// Remove `key`; `true` on success, including when it was already absent
    pub fn remove(&self, key: &str) -> Outcome<bool> {
        match self.try_remove(key) {
            Ok(_) => Outcome::ok(true),
            Err(e) => {
                self.log_failure("remove", Some(key), &e);
                Outcome::failed(false, e.kind())
            }
        }
    }

    /// Remove every key; `true` on success
    pub fn clear(&self) -> Outcome<bool> {
        match self.try_clear() {
            Ok(()) => Outcome::ok(true),
            Err(e) => {
                self.log_failure("clear", None, &e);
                Outcome::failed(false, e.kind())
            }
        }
    }

    /// Store bare text under `key`, without JSON encoding
    pub fn save_text(&self, key: &str, text: &str) -> Outcome<bool> {
        match self.locks.with_lock(key, || self.area.set_item(key, text)) {
            Ok(()) => Outcome::ok(true),
            Err(e) => {
                self.log_failure("save", Some(key), &e);
                Outcome::failed(false, e.kind())
            }
        }
    }

    /// Load bare text stored under `key`
    pub fn load_text(&self, key: &str) -> Outcome<Option<String>> {
        match self.area.get_item(key) {
            Ok(text) => Outcome::ok(text),
            Err(e) => {
                self.log_failure("load", Some(key), &e);
                Outcome::failed(None, e.kind())
            }
        }
    }

    /// Run `f` while holding the lock for `key`
    ///
    /// Other writers of `key` through any clone of this adapter wait until `f`
    /// returns. Do not call [`StoreAdapter::update`] on the same key from
    /// inside `f`; use [`StoreAdapter::update_then`] instead.
    pub fn with_key_lock<R>(&self, key: &str, f: impl FnOnce() -> R) -> R {
        self.locks.with_lock(key, f)
    }

    /// Read-modify-write the JSON value under `key`
    ///
    /// `f` receives the current value (`None` if missing or undecodable) and
    /// returns the value to store plus a result for the caller. The whole
    /// sequence holds the key's lock.
    ///
    /// Undecodable text is replaced. If the area cannot be read at all,
    /// nothing is written and the outcome carries the read error.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Outcome<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> (T, R),
    {
        self.update_then(key, f, |outcome| outcome)
    }

    /// Like [`StoreAdapter::update`], then pass the outcome to `then` before
    /// the key's lock is released
    ///
    /// `then` may write other keys; writes it makes are ordered with the
    /// update of `key`.
    pub fn update_then<T, R, F, G>(&self, key: &str, f: F, then: G) -> Outcome<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> (T, R),
        G: FnOnce(Outcome<R>) -> Outcome<R>,
    {
        self.locks
            .with_lock(key, || then(self.update_locked(key, f)))
    }

    fn update_locked<T, R, F>(&self, key: &str, f: F) -> Outcome<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> (T, R),
    {
        let current = match self.try_load::<T>(key) {
            Ok(value) => value,
            Err(e) if e.kind() == ErrorKind::Serialization => {
                self.log_failure("load", Some(key), &e);
                None
            }
            Err(e) => {
                self.log_failure("load", Some(key), &e);
                let (_, result) = f(None);
                return Outcome::failed(result, e.kind());
            }
        };

        let (next, result) = f(current);
        let written = serde_json::to_string(&next)
            .map_err(Error::from)
            .and_then(|text| self.area.set_item(key, &text));
        match written {
            Ok(()) => Outcome::ok(result),
            Err(e) => {
                self.log_failure("save", Some(key), &e);
                Outcome::failed(result, e.kind())
            }
        }
    }
}
