//! Core types and constants for the property-backed location provider

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
