//! Progress engine module

pub mod progress;

pub use progress::{
    ConsoleProgressCallback, JsonProgressCallback, MarkerPattern, NoOpProgressCallback, Percent,
    ProgressCallback, ProgressSession, ProgressTracker, DEFAULT_MARKER_PATTERN,
};
