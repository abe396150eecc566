// ABOUTME: Date formatting for note timestamps
// ABOUTME: Provides the formatter interface and a chrono-backed default implementation

use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

pub trait DateFormatter: Send + Sync {
    fn format_date(&self, timestamp: &DateTime<Utc>) -> String;
}

#[derive(Debug, Clone)]
pub struct ChronoDateFormatter {
    format: String,
}

impl ChronoDateFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
        }
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format_date(&self, timestamp: &DateTime<Utc>) -> String {
        let mut formatted = String::new();
        // Invalid format strings fail at display time rather than construction.
        if write!(formatted, "{}", timestamp.format(&self.format)).is_err() {
            return timestamp.to_rfc3339();
        }
        formatted
    }
}
