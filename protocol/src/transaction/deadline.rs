//! Transaction deadlines.
//!
//! A deadline is stored the way the header carries it: milliseconds since the
//! network epoch (2016-04-01T00:00:00Z), not since the Unix epoch.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DEFAULT_DEADLINE_HOURS, MAX_DEADLINE_HOURS, NETWORK_EPOCH_MS};
use crate::error::ConstructionError;
use crate::uint64::UInt64;

/// Expiry instant after which an unconfirmed transaction is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Deadline {
    network_ms: u64,
}

impl Deadline {
    /// Deadline `duration` from now.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidDeadline`] unless `0 < duration < 24h`.
    pub fn create(duration: Duration) -> Result<Self, ConstructionError> {
        if duration <= Duration::zero() || duration >= Duration::hours(MAX_DEADLINE_HOURS) {
            return Err(ConstructionError::InvalidDeadline {
                max_hours: MAX_DEADLINE_HOURS,
            });
        }
        Ok(Self::at(Utc::now() + duration))
    }

    /// Deadline at a fixed network-relative timestamp. Used when an encoding
    /// must be reproducible.
    pub const fn from_network_millis(network_ms: u64) -> Self {
        Self { network_ms }
    }

    fn at(instant: DateTime<Utc>) -> Self {
        let network_ms = instant.timestamp_millis().saturating_sub(NETWORK_EPOCH_MS).max(0);
        Self {
            network_ms: network_ms as u64,
        }
    }

    /// Header value.
    pub fn network_millis(&self) -> u64 {
        self.network_ms
    }

    pub fn to_uint64(&self) -> UInt64 {
        UInt64::from_uint(self.network_ms)
    }

    /// The deadline as a wall-clock instant, `None` if it overflows chrono's
    /// range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let unix_ms = i64::try_from(self.network_ms).ok()?.checked_add(NETWORK_EPOCH_MS)?;
        Utc.timestamp_millis_opt(unix_ms).single()
    }
}

impl Default for Deadline {
    /// Two hours from now.
    fn default() -> Self {
        Self::at(Utc::now() + Duration::hours(DEFAULT_DEADLINE_HOURS))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(instant) => write!(f, "{}", instant.to_rfc3339()),
            None => write!(f, "+{}ms", self.network_ms),
        }
    }
}
