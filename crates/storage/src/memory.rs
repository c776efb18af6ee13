//! MemoryArea: in-memory storage area with RwLock
//!
//! Backs the transient (session) namespace, and the persistent namespace when
//! a site is opened ephemerally.
//!
//! # Design Notes
//!
//! - `BTreeMap` keeps keys ordered so `keys()` is deterministic
//! - `parking_lot::RwLock` for thread-safe access
//! - Optional byte quota; a rejected write leaves the previous value intact

use parking_lot::RwLock;

use sitestate_core::{Result, StorageArea};

use crate::entries::Entries;

/// In-memory storage area
#[derive(Debug)]
pub struct MemoryArea {
    entries: RwLock<Entries>,
}

impl MemoryArea {
    /// Create an empty area with no quota
    pub fn new() -> Self {
        Self::with_quota(None)
    }

    /// Create an empty area with an optional byte quota
    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(Entries::new(quota)),
        }
    }
}

impl Default for MemoryArea {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().put(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key))
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestate_core::ErrorKind;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_storage_area_basic_contract() {
        let area = MemoryArea::new();

        // starts empty
        assert!(area.is_empty());
        assert!(area.get_item("missing").unwrap().is_none());

        // set + get
        area.set_item("a", "1").unwrap();
        area.set_item("b", "2").unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").unwrap().as_deref(), Some("1"));

        // overwrite keeps len()
        area.set_item("a", "ONE").unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").unwrap().as_deref(), Some("ONE"));

        // remove
        assert!(area.remove_item("b").unwrap());
        assert!(!area.remove_item("b").unwrap());
        assert_eq!(area.keys(), vec!["a".to_string()]);

        // clear
        area.clear().unwrap();
        assert_eq!(area.len(), 0);
    }

    #[test]
    fn test_quota_exceeded_keeps_old_value() {
        let area = MemoryArea::with_quota(Some(16));
        area.set_item("k", "small").unwrap();

        let err = area.set_item("k", "this value is far too large").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Quota);
        assert_eq!(area.get_item("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_concurrent_writers_on_distinct_keys() {
        let area = Arc::new(MemoryArea::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let area = Arc::clone(&area);
                thread::spawn(move || {
                    for j in 0..50 {
                        area.set_item(&format!("t{}:{}", i, j), "x").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(area.len(), 400);
    }
}
