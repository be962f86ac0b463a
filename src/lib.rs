//! ac3remux Library
//!
//! Remuxes video files so that every audio stream is re-encoded (AC3 at
//! 640 kbit/s by default) while video and subtitle streams are copied, and
//! turns ffmpeg's `time=` log markers into a monotonic progress percentage.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{AudioSettings, MediaDuration, RemuxPlan, RemuxReport, RemuxRequest, Timestamp};
pub use engine::progress::{Percent, ProgressCallback, ProgressSession, ProgressTracker};
pub use error::{RemuxError, RemuxResult};
