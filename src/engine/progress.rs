//! Progress estimation from ffmpeg log lines, plus callbacks for UI integration

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::domain::model::{MediaDuration, Timestamp};
use crate::error::{RemuxError, RemuxResult};

/// Completion percentage in `0..=100`
pub type Percent = u8;

/// Matches ffmpeg's `time=HH:MM:SS.ff` progress marker
pub const DEFAULT_MARKER_PATTERN: &str = r"time=(\d+:\d+:\d{2}\.\d+)";

static DEFAULT_PATTERN: Lazy<MarkerPattern> = Lazy::new(|| MarkerPattern {
    regex: Regex::new(DEFAULT_MARKER_PATTERN).expect("default marker pattern is valid"),
});

/// Regex locating the elapsed-time clock inside a log line.
///
/// The clock text is taken from the capture group named `clock` if the
/// pattern has one, otherwise from the first capture group.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    /// Compile a custom marker pattern
    pub fn new(pattern: &str) -> RemuxResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| RemuxError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(RemuxError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern must contain a capture group for the clock".to_string(),
            });
        }

        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Clock text of the first marker on the line
    pub fn find_clock<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(line)?;
        caps.name("clock")
            .or_else(|| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for MarkerPattern {
    fn default() -> Self {
        DEFAULT_PATTERN.clone()
    }
}

/// Factory for progress sessions sharing one marker pattern
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    pattern: MarkerPattern,
}

impl ProgressTracker {
    /// Tracker using the default ffmpeg marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker using a custom marker pattern
    pub fn with_pattern(pattern: &str) -> RemuxResult<Self> {
        Ok(Self {
            pattern: MarkerPattern::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &MarkerPattern {
        &self.pattern
    }

    /// Start tracking one operation of `total_seconds` length.
    ///
    /// Fails with [`RemuxError::InvalidDuration`] for zero, negative or
    /// non-finite durations.
    pub fn begin(&self, total_seconds: f64) -> RemuxResult<ProgressSession> {
        let total = MediaDuration::from_seconds(total_seconds)?;
        debug!("Progress session started for {:.3}s", total.as_seconds());
        Ok(ProgressSession {
            pattern: self.pattern.clone(),
            total,
            last_reported: 0,
            markers_seen: 0,
            finished: false,
        })
    }
}

/// State of one tracked operation.
///
/// Reported values are strictly increasing; each percentage is emitted at
/// most once.
#[derive(Debug, Clone)]
pub struct ProgressSession {
    pattern: MarkerPattern,
    total: MediaDuration,
    last_reported: Percent,
    markers_seen: u64,
    finished: bool,
}

impl ProgressSession {
    /// Feed one log line. Returns the new percentage if it went up.
    pub fn observe(&mut self, line: &str) -> Option<Percent> {
        if self.finished {
            return None;
        }

        let clock = self.pattern.find_clock(line)?;
        let timestamp = match Timestamp::parse_clock(clock) {
            Ok(ts) => ts,
            Err(e) => {
                debug!("Skipping progress line: {}", e);
                return None;
            }
        };
        self.markers_seen += 1;

        let candidate = percent_of(timestamp, self.total);
        trace!("Marker {} -> {}%", timestamp, candidate);
        if candidate > self.last_reported {
            self.last_reported = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    /// Mark the operation complete. Always returns 100.
    pub fn finish(&mut self) -> Percent {
        self.finished = true;
        self.last_reported = 100;
        100
    }

    pub fn last_reported(&self) -> Percent {
        self.last_reported
    }

    /// Markers that parsed successfully, including ones that did not advance progress
    pub fn markers_seen(&self) -> u64 {
        self.markers_seen
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// `floor(elapsed / total * 100)` clamped to `0..=100`
fn percent_of(timestamp: Timestamp, total: MediaDuration) -> Percent {
    let ratio = timestamp.seconds / total.as_seconds() * 100.0;
    ratio.floor().clamp(0.0, 100.0) as Percent
}

/// Progress callback trait for UI integration
pub trait ProgressCallback: Send + Sync {
    /// Called when the operation starts
    fn on_start(&self, operation: &str, total_seconds: f64);

    /// Called each time the percentage goes up
    fn on_progress(&self, percent: Percent);

    /// Called when the operation completes successfully
    fn on_complete(&self, message: &str);

    /// Called when the operation fails
    fn on_error(&self, error: &str);
}

/// Console progress bar on stderr
pub struct ConsoleProgressCallback {
    bar_length: usize,
}

impl ConsoleProgressCallback {
    pub fn new() -> Self {
        Self { bar_length: 30 }
    }

    fn render_bar(&self, percent: Percent) -> String {
        let percent = percent.min(100);
        let filled = (percent as usize * self.bar_length) / 100;
        format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            "-".repeat(self.bar_length - filled),
            percent
        )
    }
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_start(&self, operation: &str, _total_seconds: f64) {
        eprintln!("{}", operation);
        eprint!("\r{}", self.render_bar(0));
    }

    fn on_progress(&self, percent: Percent) {
        eprint!("\r{}", self.render_bar(percent));
    }

    fn on_complete(&self, message: &str) {
        eprintln!();
        eprintln!("Done: {}", message);
    }

    // The error itself is printed by the caller; just end the bar line.
    fn on_error(&self, _error: &str) {
        eprintln!();
    }
}

/// JSON progress events, one object per line on stdout
pub struct JsonProgressCallback;

impl JsonProgressCallback {
    fn emit(&self, mut event: serde_json::Value) {
        event["timestamp"] = serde_json::Value::String(chrono::Utc::now().to_rfc3339());
        println!("{}", event);
    }
}

impl ProgressCallback for JsonProgressCallback {
    fn on_start(&self, operation: &str, total_seconds: f64) {
        self.emit(serde_json::json!({
            "event": "start",
            "operation": operation,
            "total_seconds": total_seconds,
        }));
    }

    fn on_progress(&self, percent: Percent) {
        self.emit(serde_json::json!({
            "event": "progress",
            "percent": percent,
        }));
    }

    fn on_complete(&self, message: &str) {
        self.emit(serde_json::json!({
            "event": "complete",
            "message": message,
        }));
    }

    fn on_error(&self, error: &str) {
        self.emit(serde_json::json!({
            "event": "error",
            "error": error,
        }));
    }
}

/// No-op progress callback for when progress output is disabled
pub struct NoOpProgressCallback;

impl ProgressCallback for NoOpProgressCallback {
    fn on_start(&self, _operation: &str, _total_seconds: f64) {}
    fn on_progress(&self, _percent: Percent) {}
    fn on_complete(&self, _message: &str) {}
    fn on_error(&self, _error: &str) {}
}
