//! Command-line argument definitions

use clap::{Args, ValueEnum};

/// How progress is displayed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressMode {
    /// Progress bar on stderr
    Bar,
    /// One JSON event per line on stdout
    Json,
    /// No progress output
    None,
}

/// Arguments for the remux command
#[derive(Args, Debug)]
pub struct RemuxArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Output file path (default: <input stem>.<codec>.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Audio codec for every audio stream
    #[arg(long)]
    pub audio_codec: Option<String>,

    /// Audio bitrate, e.g. 640k
    #[arg(long)]
    pub audio_bitrate: Option<String>,

    /// Replace the output file if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Progress display
    #[arg(long, value_enum, default_value = "bar")]
    pub progress: ProgressMode,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
