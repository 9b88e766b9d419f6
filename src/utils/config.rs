//! Provider configuration
//!
//! Configuration is stored as JSON. Every field has a default matching the
//! stock behaviour (50 ms cadence, `gps.latitude` / `gps.longitude` keys),
//! so an empty object `{}` is a valid configuration file.

use crate::api::formatting::OutputFormat;
use crate::core::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_PROPERTY_VALUE, LATITUDE_PROPERTY, LONGITUDE_PROPERTY,
    WORKER_THREAD_NAME,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Longest accepted polling period (milliseconds)
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Configuration file is not valid JSON for [`ProviderConfig`]
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// A parameter is out of range
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Runtime parameters of a property-backed provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Period between fixes (milliseconds)
    pub poll_interval_ms: u64,
    /// Property holding the latitude
    pub latitude_key: String,
    /// Property holding the longitude
    pub longitude_key: String,
    /// Value substituted for absent properties
    pub default_value: String,
    /// Name of the polling thread
    pub thread_name: String,
    /// Output format used by the driver binary
    pub output_format: OutputFormat,
    /// Properties file read by the driver binary
    pub property_file: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            latitude_key: LATITUDE_PROPERTY.to_string(),
            longitude_key: LONGITUDE_PROPERTY.to_string(),
            default_value: DEFAULT_PROPERTY_VALUE.to_string(),
            thread_name: WORKER_THREAD_NAME.to_string(),
            output_format: OutputFormat::Text,
            property_file: None,
        }
    }
}

impl ProviderConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        let config: ProviderConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path_str,
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path_str.clone(),
            source,
        })?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path_str,
            source,
        })
    }

    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::InvalidParameter {
                parameter: "poll_interval_ms".to_string(),
                value: self.poll_interval_ms.to_string(),
                reason: format!("must be between 1 and {}", MAX_POLL_INTERVAL_MS),
            });
        }

        for (parameter, value) in [
            ("latitude_key", &self.latitude_key),
            ("longitude_key", &self.longitude_key),
            ("thread_name", &self.thread_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidParameter {
                    parameter: parameter.to_string(),
                    value: value.clone(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        // Thread names are handed to the OS as C strings
        if self.thread_name.contains('\0') {
            return Err(ConfigError::InvalidParameter {
                parameter: "thread_name".to_string(),
                value: self.thread_name.replace('\0', "\\0"),
                reason: "must not contain NUL bytes".to_string(),
            });
        }

        Ok(())
    }

    pub fn with_thread_name(mut self, thread_name: &str) -> Self {
        self.thread_name = thread_name.to_string();
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_keys(mut self, latitude_key: &str, longitude_key: &str) -> Self {
        self.latitude_key = latitude_key.to_string();
        self.longitude_key = longitude_key.to_string();
        self
    }

    pub fn with_property_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.property_file = Some(path.as_ref().to_path_buf());
        self
    }
}
