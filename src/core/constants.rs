//! Property keys and provider parameters

/// Property holding the simulated latitude (decimal degrees)
pub const LATITUDE_PROPERTY: &str = "gps.latitude";

/// Property holding the simulated longitude (decimal degrees)
pub const LONGITUDE_PROPERTY: &str = "gps.longitude";

/// Value used when a property is absent or empty
pub const DEFAULT_PROPERTY_VALUE: &str = "0";

/// Polling period of the worker thread (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Accuracy reported with every fix (meters)
pub const FIXED_ACCURACY_M: f32 = 1.0;

/// Name given to the polling thread
pub const WORKER_THREAD_NAME: &str = "prop_gps_thread";
