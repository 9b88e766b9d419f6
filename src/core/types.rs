//! Core data types for the location provider

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::time::{SystemTime, UNIX_EPOCH};

/// Bitmask of the fields of a [`LocationFix`] that carry valid data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationFlags(u16);

impl LocationFlags {
    pub const HAS_LAT_LONG: LocationFlags = LocationFlags(0x0001);
    pub const HAS_ALTITUDE: LocationFlags = LocationFlags(0x0002);
    pub const HAS_SPEED: LocationFlags = LocationFlags(0x0004);
    pub const HAS_BEARING: LocationFlags = LocationFlags(0x0008);
    pub const HAS_ACCURACY: LocationFlags = LocationFlags(0x0010);

    pub const fn empty() -> Self {
        LocationFlags(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        LocationFlags(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// True if every flag set in `other` is also set in `self`
    pub const fn contains(&self, other: LocationFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LocationFlags {
    type Output = LocationFlags;

    fn bitor(self, rhs: LocationFlags) -> LocationFlags {
        LocationFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LocationFlags {
    fn bitor_assign(&mut self, rhs: LocationFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LocationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// One reported position sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Which of the fields below are valid
    pub flags: LocationFlags,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Horizontal accuracy (meters)
    pub accuracy: f32,
    /// Wall-clock time of the fix (milliseconds since epoch)
    pub timestamp_ms: i64,
}

impl LocationFix {
    pub fn has_lat_long(&self) -> bool {
        self.flags.contains(LocationFlags::HAS_LAT_LONG)
    }

    pub fn has_accuracy(&self) -> bool {
        self.flags.contains(LocationFlags::HAS_ACCURACY)
    }
}

impl Default for LocationFix {
    fn default() -> Self {
        Self {
            flags: LocationFlags::empty(),
            latitude: 0.0,
            longitude: 0.0,
            accuracy: 0.0,
            timestamp_ms: 0,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Follows the system clock, so it may step backwards if the clock is
/// adjusted. A clock set before the epoch reads as 0.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
