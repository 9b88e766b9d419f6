//! Host-facing module descriptor
//!
//! The host discovers the location module through [`MODULE_INFO`] and opens
//! a [`LocationDevice`] from it, then drives the device through its
//! [`LocationInterface`](crate::api::LocationInterface).

pub mod device;

pub use device::{LocationDevice, ModuleInfo, MODULE_INFO};
