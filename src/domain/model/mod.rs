// Domain models - Core types and data structures

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::error::{RemuxError, RemuxResult};
use crate::utils::time::TimeParser;

/// Elapsed position reported by ffmpeg, in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timestamp {
    pub seconds: f64,
}

impl Timestamp {
    /// Create a new Timestamp from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse an `H+:MM:SS.ff` clock string
    pub fn parse_clock(clock: &str) -> RemuxResult<Self> {
        TimeParser::new().parse_clock(clock).map(Self::from_seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TimeParser::new().format_clock(self.seconds))
    }
}

/// Total length of a media file. Always finite and greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct MediaDuration {
    seconds: f64,
}

impl MediaDuration {
    /// Validate a duration in seconds
    pub fn from_seconds(seconds: f64) -> RemuxResult<Self> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(RemuxError::InvalidDuration { seconds });
        }
        Ok(Self { seconds })
    }

    /// Parse the raw stdout of `ffprobe -show_entries format=duration`
    pub fn from_probe_output(output: &str) -> Result<Self, DomainError> {
        let trimmed = output.trim();
        let seconds: f64 = trimmed.parse().map_err(|_| {
            DomainError::DurationUnavailable(format!(
                "ffprobe returned '{}' instead of a number of seconds",
                trimmed
            ))
        })?;
        Self::from_seconds(seconds).map_err(DomainError::from)
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }
}

impl fmt::Display for MediaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TimeParser::new().format_clock(self.seconds))
    }
}

/// Target audio encoding for every audio stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub codec: String,
    pub bitrate: String,
}

impl AudioSettings {
    /// Create validated audio settings
    pub fn new(codec: &str, bitrate: &str) -> Result<Self, DomainError> {
        let codec = codec.trim();
        let bitrate = bitrate.trim();

        if codec.is_empty() {
            return Err(DomainError::BadArgs("Audio codec cannot be empty".to_string()));
        }
        if !Self::is_valid_bitrate(bitrate) {
            return Err(DomainError::BadArgs(format!(
                "Invalid audio bitrate '{}'. Expected digits with optional k/M suffix, e.g. 640k",
                bitrate
            )));
        }

        Ok(Self {
            codec: codec.to_string(),
            bitrate: bitrate.to_string(),
        })
    }

    fn is_valid_bitrate(bitrate: &str) -> bool {
        let digits = bitrate
            .strip_suffix(['k', 'K', 'M'])
            .unwrap_or(bitrate);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            codec: "ac3".to_string(),
            bitrate: "640k".to_string(),
        }
    }
}

/// Remux request as entered by the user
#[derive(Debug, Clone)]
pub struct RemuxRequest {
    pub input_path: String,
    pub output_path: Option<String>,
    pub audio: AudioSettings,
    pub overwrite: bool,
}

impl RemuxRequest {
    /// Create a request with default audio settings
    pub fn new(input_path: impl Into<String>, output_path: Option<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path,
            audio: AudioSettings::default(),
            overwrite: false,
        }
    }

    pub fn with_audio(mut self, audio: AudioSettings) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Fully resolved remux job
#[derive(Debug, Clone, PartialEq)]
pub struct RemuxPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub audio: AudioSettings,
    pub overwrite: bool,
}

impl RemuxPlan {
    /// ffmpeg arguments: copy video and subtitles, re-encode audio
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-nostdin".into(),
            if self.overwrite { "-y" } else { "-n" }.into(),
            "-i".into(),
        ];
        args.push(self.input.clone().into_os_string());
        for arg in [
            "-map",
            "0",
            "-c:v",
            "copy",
            "-c:a",
            self.audio.codec.as_str(),
            "-b:a",
            self.audio.bitrate.as_str(),
            "-c:s",
            "copy",
        ] {
            args.push(arg.into());
        }
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// How the external operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationExit {
    pub success: bool,
    pub code: Option<i32>,
}

/// Result of a successful remux
#[derive(Debug, Clone)]
pub struct RemuxReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub duration_seconds: f64,
    pub final_percent: u8,
    pub lines_seen: u64,
    pub markers_seen: u64,
    pub elapsed: Duration,
}

/// Result of probing a file
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub duration: String,
}

#[cfg(test)]
mod tests;
