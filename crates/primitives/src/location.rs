//! Last reported visitor location

use serde::{Deserialize, Serialize};

use sitestate_core::{keys, Error, Result};

use crate::store::{Outcome, StoreAdapter};

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, -90..=90
    pub latitude: f64,
    /// Longitude, -180..=180
    pub longitude: f64,
}

impl Location {
    /// Build a location, rejecting out-of-range or non-finite coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::invalid_input(format!("latitude {} out of range", latitude)));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::invalid_input(format!(
                "longitude {} out of range",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Persists the most recent location under `user_location`
#[derive(Debug, Clone)]
pub struct LocationStore {
    store: StoreAdapter,
}

impl LocationStore {
    /// Keep the location in `store` (the persistent namespace)
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    /// Save `location`, replacing any earlier one
    pub fn save(&self, location: Location) -> Outcome<bool> {
        self.store.save(keys::USER_LOCATION, &location)
    }

    /// The saved location, if any
    pub fn load(&self) -> Option<Location> {
        self.store.load(keys::USER_LOCATION).into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestate_core::Namespace;
    use sitestate_storage::MemoryArea;
    use std::sync::Arc;

    #[test]
    fn test_location_round_trip() {
        let store = StoreAdapter::new(Namespace::Persistent, Arc::new(MemoryArea::new()));
        let locations = LocationStore::new(store.clone());
        let here = Location::new(13.4, 77.7).unwrap();

        assert!(locations.save(here).value);
        assert_eq!(locations.load(), Some(here));
        assert_eq!(
            store.load_text(keys::USER_LOCATION).value.as_deref(),
            Some(r#"{"latitude":13.4,"longitude":77.7}"#)
        );
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -180.5).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }
}
