//! Millisecond-precision UTC timestamps and the clock abstraction
//!
//! Every visit and event carries an ISO-8601 timestamp in the form
//! `2024-05-01T10:00:00.000Z` (UTC, milliseconds, `Z` suffix). Components never
//! read the system time directly; they ask a [`Clock`], which lets tests pin
//! time with [`ManualClock`].

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time, UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current system time
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Create from milliseconds since Unix epoch
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(
            Utc.timestamp_millis_opt(millis)
                .single()
                .unwrap_or_default(),
        )
    }

    /// Milliseconds since Unix epoch
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// ISO-8601 text, e.g. `2024-05-01T10:00:00.000Z`
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Parse ISO-8601 / RFC 3339 text
    pub fn parse(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
    }

    /// This timestamp moved forward by `millis`
    pub fn plus_millis(&self, millis: i64) -> Self {
        Timestamp(self.0 + Duration::milliseconds(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt)
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    /// The current moment
    fn now(&self) -> Timestamp;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    /// Start the clock at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance_millis(&self, millis: i64) {
        let mut current = self.current.lock();
        *current = current.plus_millis(millis);
    }

    /// Jump to an exact moment
    pub fn set(&self, ts: Timestamp) {
        *self.current.lock() = ts;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
