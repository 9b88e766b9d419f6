//! Polling thread of the property-backed provider

use crate::api::callback::LocationCallbacks;
use crate::core::{now_ms, LocationFix, LocationFlags, FIXED_ACCURACY_M};
use crate::property::PropertySource;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};

/// Stop request shared between the provider and its polling thread.
///
/// The flag is only touched under the mutex. The condvar lets a stop
/// request cut the polling sleep short.
#[derive(Debug, Default)]
pub(crate) struct StopSignal {
    requested: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    pub(crate) fn reset(&self) {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    pub(crate) fn request(&self) {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.wake.notify_all();
    }

    pub(crate) fn is_requested(&self) -> bool {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `timeout` or until a stop is requested.
    /// Returns whether a stop has been requested.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.requested.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .wake
            .wait_timeout_while(guard, timeout, |requested| !*requested)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Everything the polling thread owns while running
pub(crate) struct PollingWorker {
    pub(crate) source: Arc<dyn PropertySource>,
    pub(crate) callbacks: Arc<LocationCallbacks>,
    pub(crate) signal: Arc<StopSignal>,
    pub(crate) latitude_key: String,
    pub(crate) longitude_key: String,
    pub(crate) default_value: String,
    pub(crate) interval: Duration,
}

impl PollingWorker {
    /// Sample, report, then sleep one interval, until a stop is requested
    pub(crate) fn run(self) {
        debug!(interval_ms = self.interval.as_millis() as u64, "polling thread started");

        let mut fix = LocationFix {
            flags: LocationFlags::HAS_LAT_LONG | LocationFlags::HAS_ACCURACY,
            ..LocationFix::default()
        };
        let mut emitted: u64 = 0;

        loop {
            self.sample(&mut fix);
            trace!(
                latitude = fix.latitude,
                longitude = fix.longitude,
                timestamp_ms = fix.timestamp_ms,
                "reporting fix"
            );
            self.callbacks.report_location(&fix);
            emitted += 1;

            if self.signal.is_requested() || self.signal.wait_timeout(self.interval) {
                break;
            }
        }

        debug!(emitted, "polling thread exiting");
    }

    fn sample(&self, fix: &mut LocationFix) {
        fix.latitude = self.source.read_f64(&self.latitude_key, &self.default_value);
        fix.longitude = self.source.read_f64(&self.longitude_key, &self.default_value);
        // accuracy is not sampled; every fix reports the same value
        fix.accuracy = FIXED_ACCURACY_M;
        fix.timestamp_ms = now_ms();
    }
}
