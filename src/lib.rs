//! Property-backed Location Provider
//!
//! A synthetic location source that periodically samples latitude and
//! longitude from an external key/value property store and reports each
//! sample as a location fix through a host callback, until stopped.

pub mod core;
pub mod property;
pub mod api;
pub mod provider;
pub mod hardware;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{LocationFix, LocationFlags, LATITUDE_PROPERTY, LONGITUDE_PROPERTY};
pub use crate::property::{PropertySource, InMemoryPropertySource, FilePropertySource};
pub use crate::api::{
    LocationInterface, LocationCallbacks, LocationCallback, ProviderError, ProviderResult,
    ProviderState, PositionMode, AidingData, FixFormatter, OutputFormat
};
pub use crate::provider::PropertyLocationProvider;
pub use crate::hardware::{LocationDevice, ModuleInfo, MODULE_INFO};
pub use crate::utils::{ProviderConfig, ConfigError};
