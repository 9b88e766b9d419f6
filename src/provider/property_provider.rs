//! Location provider driven by an external property store
//!
//! [`PropertyLocationProvider`] turns two properties (latitude and
//! longitude) into a stream of location fixes. It is a simulation facility:
//! whatever is written to the property store shows up in the next fix.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init--> Idle --start--> Running --stop--> Idle
//!       ^                   |
//!       +-----cleanup-------+
//! ```
//!
//! `start` on a running provider and `stop` on an idle one are no-ops.
//! `stop` returns only after the polling thread has exited, so no fix is
//! reported after it returns. A stop request also interrupts the polling
//! sleep, which bounds stop latency by the duration of one location
//! callback. A callback that blocks forever therefore blocks `stop`.

use crate::api::callback::LocationCallbacks;
use crate::api::error::{ProviderError, ProviderResult};
use crate::api::interface::LocationInterface;
use crate::api::types::ProviderState;
use crate::property::PropertySource;
use crate::provider::worker::{PollingWorker, StopSignal};
use crate::utils::config::ProviderConfig;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace, warn};

/// Property-backed location provider
pub struct PropertyLocationProvider {
    /// Where latitude/longitude are read from
    source: Arc<dyn PropertySource>,
    /// Keys, cadence and thread name
    config: ProviderConfig,
    /// Bound by `init`, released by `cleanup`
    callbacks: Option<Arc<LocationCallbacks>>,
    /// Stop flag shared with the polling thread; lives from `init` to `cleanup`
    signal: Option<Arc<StopSignal>>,
    /// Polling thread, present from `start` until joined
    worker: Option<JoinHandle<()>>,
}

impl PropertyLocationProvider {
    /// Create a provider with the default configuration
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self::with_config(source, ProviderConfig::default())
    }

    /// Create a provider with an explicit configuration
    pub fn with_config(source: Arc<dyn PropertySource>, config: ProviderConfig) -> Self {
        Self {
            source,
            config,
            callbacks: None,
            signal: None,
            worker: None,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.callbacks.is_some()
    }

    fn worker_alive(&self) -> bool {
        self.worker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Join a polling thread that already exited on its own
    fn reap_finished_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("previous polling thread had panicked");
            }
        }
    }
}

impl LocationInterface for PropertyLocationProvider {
    fn init(&mut self, callbacks: LocationCallbacks) -> ProviderResult<()> {
        if self.is_initialized() {
            debug!("init: already initialized, keeping existing callbacks");
            return Ok(());
        }

        self.callbacks = Some(Arc::new(callbacks));
        self.signal = Some(Arc::new(StopSignal::default()));
        debug!("provider initialized");
        Ok(())
    }

    fn start(&mut self) -> ProviderResult<()> {
        let (callbacks, signal) = match (&self.callbacks, &self.signal) {
            (Some(callbacks), Some(signal)) => (Arc::clone(callbacks), Arc::clone(signal)),
            _ => {
                warn!("start called before init");
                return Err(ProviderError::NotInitialized { operation: "start" });
            }
        };

        if self.worker_alive() {
            debug!("start: already running");
            return Ok(());
        }
        self.reap_finished_worker();

        if let Err(e) = self.config.validate() {
            warn!(error = %e, "start refused");
            return Err(e.into());
        }

        signal.reset();
        let worker = PollingWorker {
            source: Arc::clone(&self.source),
            callbacks,
            signal,
            latitude_key: self.config.latitude_key.clone(),
            longitude_key: self.config.longitude_key.clone(),
            default_value: self.config.default_value.clone(),
            interval: self.config.poll_interval(),
        };

        let handle = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || worker.run())
            .map_err(ProviderError::ThreadSpawn)?;
        self.worker = Some(handle);

        debug!(
            thread = %self.config.thread_name,
            interval_ms = self.config.poll_interval_ms,
            "provider started"
        );
        Ok(())
    }

    fn stop(&mut self) -> ProviderResult<()> {
        let Some(signal) = &self.signal else {
            trace!("stop: not initialized");
            return Ok(());
        };
        signal.request();

        let Some(handle) = self.worker.take() else {
            trace!("stop: not running");
            return Ok(());
        };

        if handle.join().is_err() {
            error!("polling thread panicked");
            return Err(ProviderError::WorkerPanicked);
        }

        debug!("provider stopped");
        Ok(())
    }

    fn cleanup(&mut self) -> ProviderResult<()> {
        match self.state() {
            ProviderState::Uninitialized => return Ok(()),
            state @ (ProviderState::Running | ProviderState::Stopping) => {
                warn!(%state, "cleanup called while polling thread is active");
                return Err(ProviderError::InvalidState {
                    operation: "cleanup",
                    state,
                });
            }
            ProviderState::Idle => {}
        }

        self.reap_finished_worker();
        self.callbacks = None;
        self.signal = None;
        debug!("provider cleaned up");
        Ok(())
    }

    fn state(&self) -> ProviderState {
        if !self.is_initialized() {
            return ProviderState::Uninitialized;
        }
        if !self.worker_alive() {
            return ProviderState::Idle;
        }
        match &self.signal {
            Some(signal) if signal.is_requested() => ProviderState::Stopping,
            _ => ProviderState::Running,
        }
    }
}

impl Drop for PropertyLocationProvider {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(e) = self.stop() {
                error!(error = %e, "failed to stop polling thread on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AidingData, PositionMode};
    use crate::core::{LocationFix, LocationFlags};
    use crate::property::InMemoryPropertySource;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    type Recorded = Arc<Mutex<Vec<LocationFix>>>;

    fn recorder() -> (LocationCallbacks, Recorded) {
        let fixes: Recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fixes);
        let callbacks = LocationCallbacks::new(move |fix| sink.lock().unwrap().push(*fix));
        (callbacks, fixes)
    }

    fn count(fixes: &Recorded) -> usize {
        fixes.lock().unwrap().len()
    }

    fn wait_for_fixes(fixes: &Recorded, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while count(fixes) < n && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(count(fixes) >= n, "timed out waiting for {} fixes", n);
    }

    fn provider_with(source: &InMemoryPropertySource, interval_ms: u64) -> PropertyLocationProvider {
        PropertyLocationProvider::with_config(
            Arc::new(source.clone()),
            ProviderConfig::default().with_poll_interval_ms(interval_ms),
        )
    }

    #[test]
    fn test_reports_property_values() {
        let source = InMemoryPropertySource::new();
        source.set("gps.latitude", "37.5");
        source.set("gps.longitude", "-122.3");
        let mut provider = PropertyLocationProvider::new(Arc::new(source.clone()));
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        thread::sleep(Duration::from_millis(120));
        provider.stop().unwrap();

        let fixes = fixes.lock().unwrap();
        assert!(!fixes.is_empty());
        for fix in fixes.iter() {
            assert_eq!(fix.latitude, 37.5);
            assert_eq!(fix.longitude, -122.3);
            assert_eq!(fix.accuracy, 1.0);
            assert_eq!(fix.flags, LocationFlags::HAS_LAT_LONG | LocationFlags::HAS_ACCURACY);
        }
    }

    #[test]
    fn test_absent_properties_report_zero() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 50);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        provider.stop().unwrap();

        for fix in fixes.lock().unwrap().iter() {
            assert_eq!(fix.latitude, 0.0);
            assert_eq!(fix.longitude, 0.0);
        }
    }

    #[test]
    fn test_non_numeric_properties_report_zero() {
        let source = InMemoryPropertySource::new();
        source.set("gps.latitude", "north");
        source.set("gps.longitude", "12.75");
        let mut provider = provider_with(&source, 20);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);
        provider.stop().unwrap();

        let fixes = fixes.lock().unwrap();
        assert_eq!(fixes[0].latitude, 0.0);
        assert_eq!(fixes[0].longitude, 12.75);
    }

    #[test]
    fn test_property_changes_while_running() {
        let source = InMemoryPropertySource::new();
        source.set("gps.latitude", "1.0");
        let mut provider = provider_with(&source, 10);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);

        source.set("gps.latitude", "2.0");
        let seen = count(&fixes);
        wait_for_fixes(&fixes, seen + 2);
        provider.stop().unwrap();

        let last = *fixes.lock().unwrap().last().unwrap();
        assert_eq!(last.latitude, 2.0);
    }

    #[test]
    fn test_custom_keys() {
        let source = InMemoryPropertySource::new();
        source.set("sim.lat", "-33.86");
        source.set("sim.lon", "151.21");
        let config = ProviderConfig::default()
            .with_poll_interval_ms(20)
            .with_keys("sim.lat", "sim.lon");
        let mut provider = PropertyLocationProvider::with_config(Arc::new(source), config);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);
        provider.stop().unwrap();

        let first = fixes.lock().unwrap()[0];
        assert_eq!(first.latitude, -33.86);
        assert_eq!(first.longitude, 151.21);
    }

    #[test]
    fn test_start_twice_runs_one_worker() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 100);
        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();

        let started = Instant::now();
        provider.start().unwrap();
        provider.start().unwrap();
        assert_eq!(provider.state(), ProviderState::Running);
        thread::sleep(Duration::from_millis(350));
        provider.stop().unwrap();
        let elapsed_ms = started.elapsed().as_millis() as usize;

        // a second worker would roughly double this
        assert!(count(&fixes) <= elapsed_ms / 100 + 2);
        assert!(count(&fixes) >= 1);
    }

    #[test]
    fn test_stop_before_start_returns() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 50);
        provider.stop().unwrap();

        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();
        provider.stop().unwrap();
        provider.stop().unwrap();

        assert_eq!(provider.state(), ProviderState::Idle);
        assert_eq!(count(&fixes), 0);
    }

    #[test]
    fn test_no_fixes_after_stop() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 3);
        provider.stop().unwrap();

        let stopped_at = count(&fixes);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(count(&fixes), stopped_at);
        assert_eq!(provider.state(), ProviderState::Idle);
    }

    #[test]
    fn test_timestamps_non_decreasing_and_spaced() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 50);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 4);
        provider.stop().unwrap();

        let fixes = fixes.lock().unwrap();
        for pair in fixes.windows(2) {
            let gap = pair[1].timestamp_ms - pair[0].timestamp_ms;
            assert!(gap >= 0);
            // allow for millisecond truncation of the wall clock
            assert!(gap >= 45, "fixes only {}ms apart", gap);
        }
    }

    #[test]
    fn test_stop_interrupts_sleep() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10_000);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);

        let stopping = Instant::now();
        provider.stop().unwrap();
        assert!(stopping.elapsed() < Duration::from_secs(2));
        assert_eq!(count(&fixes), 1);
    }

    #[test]
    fn test_restart_after_stop() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);
        provider.stop().unwrap();
        let first_run = count(&fixes);

        provider.start().unwrap();
        wait_for_fixes(&fixes, first_run + 1);
        provider.stop().unwrap();
        assert!(count(&fixes) > first_run);
    }

    #[test]
    fn test_start_before_init_fails() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 50);

        let err = provider.start().unwrap_err();
        assert!(matches!(err, ProviderError::NotInitialized { operation: "start" }));
        assert_eq!(provider.state(), ProviderState::Uninitialized);
    }

    #[test]
    fn test_start_rejects_zero_interval() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 0);
        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();

        let err = provider.start().unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
        assert_eq!(provider.state(), ProviderState::Idle);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count(&fixes), 0);
    }

    #[test]
    fn test_start_rejects_nul_thread_name() {
        let source = InMemoryPropertySource::new();
        let config = ProviderConfig::default().with_thread_name("prop\0gps");
        let mut provider = PropertyLocationProvider::with_config(Arc::new(source), config);
        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();

        assert!(matches!(provider.start(), Err(ProviderError::InvalidConfig(_))));
        assert_eq!(provider.state(), ProviderState::Idle);
        assert_eq!(count(&fixes), 0);
        provider.stop().unwrap();
    }

    #[test]
    fn test_init_twice_keeps_first_callbacks() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        let (first, first_fixes) = recorder();
        let (second, second_fixes) = recorder();

        provider.init(first).unwrap();
        provider.init(second).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&first_fixes, 1);
        provider.stop().unwrap();

        assert_eq!(count(&second_fixes), 0);
    }

    #[test]
    fn test_cleanup_lifecycle() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        let (callbacks, _fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        let err = provider.cleanup().unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidState { operation: "cleanup", state: ProviderState::Running }
        ));

        provider.stop().unwrap();
        provider.cleanup().unwrap();
        assert_eq!(provider.state(), ProviderState::Uninitialized);
        provider.cleanup().unwrap();

        // A cleaned-up provider can be bound to a new callback
        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);
        provider.stop().unwrap();
    }

    #[test]
    fn test_panicking_callback_reported_on_stop() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        provider
            .init(LocationCallbacks::new(|_fix| panic!("host callback failed")))
            .unwrap();
        provider.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while provider.state() == ProviderState::Running && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(provider.state(), ProviderState::Idle);
        assert!(matches!(provider.stop(), Err(ProviderError::WorkerPanicked)));
        provider.cleanup().unwrap();
    }

    #[test]
    fn test_assistance_operations_are_noops() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 50);
        let (callbacks, fixes) = recorder();
        provider.init(callbacks).unwrap();

        provider.inject_time(1_700_000_000_000, 123_456, 10).unwrap();
        provider.inject_location(51.5, -0.12, 25.0).unwrap();
        provider.delete_aiding_data(AidingData::ALL);
        provider.set_position_mode(PositionMode::MsBased, 1000).unwrap();
        assert!(provider.get_extension("agps").is_none());
        assert!(provider.get_extension("").is_none());

        assert_eq!(provider.state(), ProviderState::Idle);
        assert_eq!(count(&fixes), 0);
    }

    #[test]
    fn test_drop_stops_worker() {
        let source = InMemoryPropertySource::new();
        let mut provider = provider_with(&source, 10);
        let (callbacks, fixes) = recorder();

        provider.init(callbacks).unwrap();
        provider.start().unwrap();
        wait_for_fixes(&fixes, 1);
        drop(provider);

        let dropped_at = count(&fixes);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(count(&fixes), dropped_at);
    }
}
