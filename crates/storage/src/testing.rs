//! Testing utilities for failure containment
//!
//! - **DeniedArea**: every call fails with `AccessDenied`, the way storage
//!   behaves when a browser blocks it (private mode, disabled cookies)
//! - **FailingWritesArea**: reads succeed, writes fail, for testing that a
//!   failed save never corrupts what callers read back

use sitestate_core::{Error, Result, StorageArea};

use crate::memory::MemoryArea;

/// Storage area that refuses every operation
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedArea;

impl StorageArea for DeniedArea {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::access_denied("storage is disabled"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::access_denied("storage is disabled"))
    }

    fn remove_item(&self, _key: &str) -> Result<bool> {
        Err(Error::access_denied("storage is disabled"))
    }

    fn clear(&self) -> Result<()> {
        Err(Error::access_denied("storage is disabled"))
    }

    fn len(&self) -> usize {
        0
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Storage area whose reads work but whose writes always fail
#[derive(Debug, Default)]
pub struct FailingWritesArea {
    inner: MemoryArea,
}

impl FailingWritesArea {
    /// Create with preloaded contents
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let inner = MemoryArea::new();
        for (k, v) in items {
            // MemoryArea without a quota never fails
            let _ = inner.set_item(k, v);
        }
        Self { inner }
    }
}

impl StorageArea for FailingWritesArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<()> {
        Err(Error::access_denied(format!("write to '{}' rejected", key)))
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        Err(Error::access_denied(format!("remove of '{}' rejected", key)))
    }

    fn clear(&self) -> Result<()> {
        Err(Error::access_denied("clear rejected"))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }
}
