//! Location provider implementations

pub mod property_provider;
mod worker;

pub use property_provider::PropertyLocationProvider;
