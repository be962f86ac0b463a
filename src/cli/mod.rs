//! CLI module for ac3remux
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ProbeArgs, ProgressMode, RemuxArgs};

/// ac3remux
///
/// Remux a video file so every audio track becomes AC3 while video and
/// subtitle streams are copied untouched.
#[derive(Parser, Debug)]
#[command(name = "ac3remux")]
#[command(about = "Remux video files to AC3 audio with live ffmpeg progress")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file
    #[arg(long, global = true, env = "AC3REMUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remux a file, re-encoding audio and copying video and subtitles
    Remux(RemuxArgs),
    /// Print the duration of a media file
    Probe(ProbeArgs),
}
