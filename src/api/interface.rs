//! Location capability surface invoked by the host
//!
//! Only the lifecycle operations are required. The assistance operations
//! (time and location injection, aiding-data deletion, position mode) and
//! extension lookup have no-op defaults so a backend overrides just the
//! ones it actually supports.

use crate::api::callback::LocationCallbacks;
use crate::api::error::ProviderResult;
use crate::api::types::{AidingData, Extension, PositionMode, ProviderState, UtcTime};
use tracing::trace;

/// Hardware-style interface of a location provider
pub trait LocationInterface: Send {
    /// Bind the callback table. Calling it again while initialized is a no-op.
    fn init(&mut self, callbacks: LocationCallbacks) -> ProviderResult<()>;

    /// Begin emitting fixes. Starting a running provider is a no-op.
    fn start(&mut self) -> ProviderResult<()>;

    /// Stop emitting fixes and wait for the polling thread to exit.
    /// Safe to call when never started.
    fn stop(&mut self) -> ProviderResult<()>;

    /// Release the callback table. Must not be called while running.
    fn cleanup(&mut self) -> ProviderResult<()>;

    /// Current lifecycle state
    fn state(&self) -> ProviderState;

    fn inject_time(
        &mut self,
        time: UtcTime,
        time_reference_ms: i64,
        uncertainty_ms: i32,
    ) -> ProviderResult<()> {
        trace!(time, time_reference_ms, uncertainty_ms, "inject_time");
        Ok(())
    }

    fn inject_location(&mut self, latitude: f64, longitude: f64, accuracy: f32) -> ProviderResult<()> {
        trace!(latitude, longitude, accuracy, "inject_location");
        Ok(())
    }

    fn delete_aiding_data(&mut self, flags: AidingData) {
        trace!(flags = flags.bits(), "delete_aiding_data");
    }

    fn set_position_mode(&mut self, mode: PositionMode, fix_frequency: u32) -> ProviderResult<()> {
        trace!(?mode, fix_frequency, "set_position_mode");
        Ok(())
    }

    /// Look up an optional capability by name
    fn get_extension(&self, name: &str) -> Option<&dyn Extension> {
        trace!(name, "get_extension: no extensions supported");
        None
    }
}
