//! Host-facing API of the location provider
//!
//! This module holds the capability surface the host drives, the callback
//! table the provider reports through, the error types, and output
//! formatting for emitted fixes.

pub mod callback;
pub mod error;
pub mod formatting;
pub mod interface;
pub mod types;

pub use callback::{LocationCallback, LocationCallbacks};
pub use error::{ProviderError, ProviderResult};
pub use formatting::{FixFormatter, OutputFormat};
pub use interface::LocationInterface;
pub use types::{AidingData, Extension, PositionMode, ProviderState, UtcTime};
