//! Location fix output formatting
//!
//! Renders each emitted fix as a single line of text, JSON, or CSV for
//! logging and for the driver binary's stdout.

use crate::core::LocationFix;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable single line
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Single-line formatter for location fixes
#[derive(Debug, Clone)]
pub struct FixFormatter {
    /// Selected output format
    pub format: OutputFormat,
    /// Decimal places for latitude/longitude in text and CSV output
    pub precision: usize,
}

impl Default for FixFormatter {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 6,
        }
    }
}

impl FixFormatter {
    /// Create a formatter for the given output format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Header row to print before the first fix, if the format has one
    pub fn header(&self) -> Option<&'static str> {
        match self.format {
            OutputFormat::Csv => Some("timestamp_ms,latitude,longitude,accuracy,flags"),
            OutputFormat::Text | OutputFormat::Json => None,
        }
    }

    /// Format one fix as a line (without trailing newline)
    pub fn format(&self, fix: &LocationFix) -> Result<String, serde_json::Error> {
        let p = self.precision;
        match self.format {
            OutputFormat::Text => Ok(format!(
                "Pos: {:.p$}°, {:.p$}° | Acc:{:.1}m | Flags:{} | t={}ms",
                fix.latitude, fix.longitude, fix.accuracy, fix.flags, fix.timestamp_ms
            )),
            OutputFormat::Json => serde_json::to_string(fix),
            OutputFormat::Csv => Ok(format!(
                "{},{:.p$},{:.p$},{:.1},{}",
                fix.timestamp_ms,
                fix.latitude,
                fix.longitude,
                fix.accuracy,
                fix.flags.bits()
            )),
        }
    }
}
