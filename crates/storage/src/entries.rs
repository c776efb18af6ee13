//! Quota-accounted ordered key/value map shared by the storage areas

use std::collections::BTreeMap;

use sitestate_core::{Error, Limits, Result};

/// Ordered map from key to text with a running byte count
#[derive(Debug, Clone, Default)]
pub(crate) struct Entries {
    map: BTreeMap<String, String>,
    bytes: usize,
    quota: Option<usize>,
}

impl Entries {
    pub(crate) fn new(quota: Option<usize>) -> Self {
        Self {
            map: BTreeMap::new(),
            bytes: 0,
            quota,
        }
    }

    /// Build from an existing map, e.g. one loaded from disk
    ///
    /// The quota is not enforced on load; it only limits later writes.
    pub(crate) fn from_map(map: BTreeMap<String, String>, quota: Option<usize>) -> Self {
        let bytes = map.iter().map(|(k, v)| Limits::entry_size(k, v)).sum();
        Self { map, bytes, quota }
    }

    pub(crate) fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }

    pub(crate) fn get(&self, key: &str) -> Option<&String> {
        self.map.get(key)
    }

    /// Insert or replace, failing without change if the quota would be exceeded
    pub(crate) fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let old = self
            .map
            .get(key)
            .map(|v| Limits::entry_size(key, v))
            .unwrap_or(0);
        let required = self.bytes - old + Limits::entry_size(key, value);

        if let Some(quota) = self.quota {
            if required > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        self.map.insert(key.to_string(), value.to_string());
        self.bytes = required;
        Ok(())
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        match self.map.remove(key) {
            Some(old) => {
                self.bytes -= Limits::entry_size(key, &old);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.bytes = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> usize {
        self.bytes
    }
}
