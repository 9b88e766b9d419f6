//! Module descriptor and device factory

use crate::api::error::{ProviderError, ProviderResult};
use crate::api::interface::LocationInterface;
use crate::property::PropertySource;
use crate::provider::PropertyLocationProvider;
use crate::utils::config::ProviderConfig;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Static description of a location module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Identifier the host opens the device by
    pub id: &'static str,
    /// Human-readable module name
    pub name: &'static str,
    pub author: &'static str,
    pub version_major: u16,
    pub version_minor: u16,
}

/// Descriptor of the property-backed location module
pub static MODULE_INFO: ModuleInfo = ModuleInfo {
    id: "gps",
    name: "Properties based GPS Module",
    author: "Dmitry Adzhiev",
    version_major: 1,
    version_minor: 0,
};

impl ModuleInfo {
    /// Open the device called `name`.
    ///
    /// Every open yields a fresh provider, so reopening resets all
    /// lifecycle state.
    pub fn open(
        &'static self,
        name: &str,
        source: Arc<dyn PropertySource>,
        config: ProviderConfig,
    ) -> ProviderResult<LocationDevice> {
        if name != self.id {
            return Err(ProviderError::UnknownDevice {
                name: name.to_string(),
            });
        }

        config.validate()?;

        debug!(module = self.name, device = name, "opening device");
        Ok(LocationDevice {
            module: self,
            interface: Box::new(PropertyLocationProvider::with_config(source, config)),
        })
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}.{} ({})", self.name, self.version_major, self.version_minor, self.author)
    }
}

/// Device handle returned by [`ModuleInfo::open`]
pub struct LocationDevice {
    module: &'static ModuleInfo,
    interface: Box<dyn LocationInterface>,
}

impl LocationDevice {
    pub fn module(&self) -> &'static ModuleInfo {
        self.module
    }

    /// Capability surface of the device
    pub fn location_interface(&mut self) -> &mut dyn LocationInterface {
        self.interface.as_mut()
    }
}

impl fmt::Debug for LocationDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationDevice")
            .field("module", &self.module.id)
            .field("state", &self.interface.state())
            .finish()
    }
}
