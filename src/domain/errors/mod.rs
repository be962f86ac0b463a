// Domain errors - Error types for the use-case layer

use std::fmt;

use crate::error::RemuxError;

/// Domain-specific error types
#[derive(Debug, Clone)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Duration could not be determined for the input
    DurationUnavailable(String),
    /// External tool could not be spawned or exited unsuccessfully
    ExecutionFailed {
        code: Option<i32>,
        output_tail: Vec<String>,
    },
    /// I/O failure while talking to a child process
    ProcessError(String),
    /// Configuration problem
    ConfigError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "Input file not found: {}", msg),
            DomainError::DurationUnavailable(msg) => {
                write!(f, "Could not determine video duration: {}", msg)
            }
            DomainError::ExecutionFailed { code, output_tail } => {
                match code {
                    Some(code) => write!(f, "ffmpeg exited with status {}", code)?,
                    None => write!(f, "ffmpeg terminated without an exit status")?,
                }
                for line in output_tail {
                    write!(f, "\n  {}", line)?;
                }
                Ok(())
            }
            DomainError::ProcessError(msg) => write!(f, "Process error: {}", msg),
            DomainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<RemuxError> for DomainError {
    fn from(err: RemuxError) -> Self {
        match err {
            RemuxError::InvalidDuration { .. } => DomainError::DurationUnavailable(err.to_string()),
            RemuxError::ConfigError { message } => DomainError::ConfigError(message),
            RemuxError::IoError(e) => DomainError::ProcessError(e.to_string()),
            other => DomainError::BadArgs(other.to_string()),
        }
    }
}
