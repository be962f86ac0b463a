//! ac3remux
//!
//! Remux a video file to AC3 audio while keeping video and subtitle streams
//! untouched, with a live progress bar driven by ffmpeg's output.
//!
//! # Usage
//!
//! ```bash
//! ac3remux remux --input "movie.mkv" --output "movie.ac3.mkv"
//! ac3remux remux --input "movie.mkv" --audio-bitrate 448k --progress json
//! ac3remux probe --input "movie.mkv"
//! ```
//!
//! Requires `ffmpeg` and `ffprobe` on the `PATH` (or configured paths).

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ac3_remux_cli::app::DefaultAppContainer;
use ac3_remux_cli::cli::{commands, Cli, Commands};
use ac3_remux_cli::config_initialization::initialize_configuration;
use ac3_remux_cli::utils::logging::LoggingSystem;

/// Main entry point for the ac3remux CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let (config, sources) = initialize_configuration(&cli)?;

    // Initialize logging
    let logging = LoggingSystem::new(config.logging());
    logging.initialize()?;
    logging.log_system_info();
    sources.log();

    let container = DefaultAppContainer::new(&config)?;

    // Execute the requested command
    match cli.command {
        Commands::Remux(args) => {
            info!("Executing remux command");
            commands::remux(&container, &config, args).await?;
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(&container, args).await?;
        }
    }

    info!("ac3remux completed successfully");
    Ok(())
}
