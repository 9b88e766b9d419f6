//! In-process property store for tests and embedding

use crate::property::PropertySource;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, mutable property store.
///
/// Clones share the same map, so a test can keep one handle and change
/// values while a provider reads them from its worker thread.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertySource {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPropertySource {
    /// Create an empty property store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value
    pub fn set(&self, name: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }

    /// Remove `name`, returning its previous value
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Raw stored value, without default substitution
    pub fn get(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn clear(&self) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PropertySource for InMemoryPropertySource {
    fn read_scalar(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }
}
