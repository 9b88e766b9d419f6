//! Provider error types

use crate::api::types::ProviderState;
use crate::utils::config::ConfigError;
use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors reported by the provider lifecycle
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Operation needs a bound callback but `init` has not been called
    #[error("{operation} called before init")]
    NotInitialized { operation: &'static str },

    /// Operation is not allowed in the provider's current state
    #[error("{operation} is not allowed while the provider is {state}")]
    InvalidState {
        operation: &'static str,
        state: ProviderState,
    },

    /// The polling thread could not be created
    #[error("failed to spawn polling thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// The polling thread panicked, usually inside the location callback
    #[error("polling thread panicked")]
    WorkerPanicked,

    /// The provider configuration is out of range
    #[error("invalid provider configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The host asked the module for a device it does not provide
    #[error("unknown device '{name}'")]
    UnknownDevice { name: String },
}

impl ProviderError {
    /// True for errors caused by calling the lifecycle out of order
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            ProviderError::NotInitialized { .. } | ProviderError::InvalidState { .. }
        )
    }
}
