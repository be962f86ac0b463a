//! Error handling module for ac3remux

use thiserror::Error;

/// Main error type for ac3remux library operations
#[derive(Error, Debug)]
pub enum RemuxError {
    /// Total duration is zero, negative, NaN or infinite
    #[error("Invalid duration: {seconds}. Expected a finite number of seconds greater than zero")]
    InvalidDuration { seconds: f64 },

    /// A matched progress marker could not be parsed into seconds
    #[error("Malformed timestamp: {text}. Expected HH:MM:SS.ff")]
    MalformedTimestamp { text: String },

    /// Progress marker pattern is unusable
    #[error("Invalid progress pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for ac3remux operations
pub type RemuxResult<T> = std::result::Result<T, RemuxError>;
