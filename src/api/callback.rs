//! Callbacks the provider invokes on its host

use crate::core::LocationFix;
use std::fmt;

/// Callback function type for location reports.
///
/// Invoked synchronously on the polling thread; the next cycle does not
/// begin until it returns.
pub type LocationCallback = Box<dyn Fn(&LocationFix) + Send + Sync>;

/// Callback table bound to a provider by `init`
pub struct LocationCallbacks {
    location: LocationCallback,
}

impl LocationCallbacks {
    /// Create a callback table from a location handler
    pub fn new<F>(location: F) -> Self
    where
        F: Fn(&LocationFix) + Send + Sync + 'static,
    {
        Self {
            location: Box::new(location),
        }
    }

    /// Deliver one fix to the host
    pub fn report_location(&self, fix: &LocationFix) {
        (self.location)(fix)
    }
}

impl fmt::Debug for LocationCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationCallbacks").finish_non_exhaustive()
    }
}
