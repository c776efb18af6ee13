//! Per-key mutual exclusion for read-modify-write sequences
//!
//! A single `get_item` or `set_item` is atomic on its own, but a
//! load-append-save spans two calls. Without serialization two writers that
//! both append to `page_history` would each save their own copy and one visit
//! would be lost. `KeyLocks` hands out one mutex per key so those sequences run
//! one at a time per key while different keys proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

/// Lazily created mutex per storage key
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`
    pub fn with_lock<R>(&self, key: &str, f: impl FnOnce() -> R) -> R {
        // Clone the Arc out so the DashMap shard guard is released before
        // blocking on the key mutex.
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();
        f()
    }

    /// Number of keys that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no key has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
