//! Clock-string parsing and formatting utilities

use crate::error::{RemuxError, RemuxResult};

/// Parser for the `H+:MM:SS.ff` clock strings ffmpeg prints
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse an `HH:MM:SS.ff` clock string to seconds
    pub fn parse_clock(&self, clock: &str) -> RemuxResult<f64> {
        let clock = clock.trim();
        let malformed = || RemuxError::MalformedTimestamp {
            text: clock.to_string(),
        };

        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 {
            return Err(malformed());
        }

        let hours: u64 = parts[0].parse().map_err(|_| malformed())?;
        let minutes: u64 = parts[1].parse().map_err(|_| malformed())?;
        let seconds: f64 = parts[2].parse().map_err(|_| malformed())?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(malformed());
        }

        Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
    }

    /// Format seconds as an `HH:MM:SS.ff` clock string
    pub fn format_clock(&self, seconds: f64) -> String {
        let seconds = seconds.max(0.0);
        let centis_total = (seconds * 100.0).round() as u64;
        let hours = centis_total / 360_000;
        let minutes = (centis_total % 360_000) / 6_000;
        let secs = (centis_total % 6_000) / 100;
        let centis = centis_total % 100;

        format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
    }
}
