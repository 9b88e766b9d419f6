//! Common API types for the location capability surface

use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC time in milliseconds since epoch, as handed over by the host
pub type UtcTime = i64;

/// Lifecycle state of a location provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderState {
    /// No callback bound
    Uninitialized,
    /// Callback bound, no polling thread
    Idle,
    /// Polling thread active
    Running,
    /// Stop requested but the polling thread has not exited yet
    Stopping,
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderState::Uninitialized => "uninitialized",
            ProviderState::Idle => "idle",
            ProviderState::Running => "running",
            ProviderState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Positioning mode requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionMode {
    /// Receiver computes fixes on its own
    Standalone,
    /// Mobile-station based assistance
    MsBased,
    /// Mobile-station assisted (network computes the fix)
    MsAssisted,
}

/// Bitmask selecting which aiding data the host wants discarded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AidingData(u16);

impl AidingData {
    pub const EPHEMERIS: AidingData = AidingData(0x0001);
    pub const ALMANAC: AidingData = AidingData(0x0002);
    pub const POSITION: AidingData = AidingData(0x0004);
    pub const TIME: AidingData = AidingData(0x0008);
    pub const IONO: AidingData = AidingData(0x0010);
    pub const UTC: AidingData = AidingData(0x0020);
    pub const HEALTH: AidingData = AidingData(0x0040);
    pub const SVDIR: AidingData = AidingData(0x0080);
    pub const SVSTEER: AidingData = AidingData(0x0100);
    pub const SADATA: AidingData = AidingData(0x0200);
    pub const RTI: AidingData = AidingData(0x0400);
    pub const CELLDB_INFO: AidingData = AidingData(0x8000);
    pub const ALL: AidingData = AidingData(0xFFFF);

    pub const fn from_bits(bits: u16) -> Self {
        AidingData(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }
}

impl std::ops::BitOr for AidingData {
    type Output = AidingData;

    fn bitor(self, rhs: AidingData) -> AidingData {
        AidingData(self.0 | rhs.0)
    }
}

/// Optional capability a provider may expose by name
pub trait Extension: Send + Sync {
    fn name(&self) -> &str;
}
