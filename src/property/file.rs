//! Properties file backed source
//!
//! The file holds `key=value` assignments, one per line. Blank lines and
//! lines starting with `#` are ignored and the last assignment of a key
//! wins. The file is re-read on every lookup so edits show up on the next
//! polling cycle.

use crate::property::PropertySource;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Property source reading a `key=value` file from disk
#[derive(Debug, Clone)]
pub struct FilePropertySource {
    path: PathBuf,
}

impl FilePropertySource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every assignment in the file; an unreadable file is empty
    pub fn load(&self) -> HashMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_properties(&content),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "property file unreadable");
                HashMap::new()
            }
        }
    }
}

impl PropertySource for FilePropertySource {
    fn read_scalar(&self, name: &str, default: &str) -> String {
        match self.load().remove(name) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }
}

fn parse_properties(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
