//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::RemuxConfig;
use crate::app::AppContainer;
use crate::cli::args::{ProbeArgs, ProgressMode, RemuxArgs};
use crate::domain::model::{ProbeReport, RemuxRequest};
use crate::engine::progress::{
    ConsoleProgressCallback, JsonProgressCallback, NoOpProgressCallback, ProgressCallback,
};
use crate::utils::Utils;

/// Execute the remux command
pub async fn remux(container: &dyn AppContainer, config: &RemuxConfig, args: RemuxArgs) -> Result<()> {
    info!("Starting remux operation");

    let audio = config
        .audio_settings()
        .context("Invalid audio settings")?;
    let request = RemuxRequest::new(args.input, args.output)
        .with_audio(audio)
        .with_overwrite(config.overwrite);

    let callback = progress_callback(args.progress);
    let report = container
        .remux_interactor()
        .remux(request, callback.as_ref())
        .await
        .context("Remux failed")?;

    info!(
        "Remuxed {:.1}s of media in {} ({} log lines, {} progress markers)",
        report.duration_seconds,
        Utils::format_duration(report.elapsed),
        report.lines_seen,
        report.markers_seen
    );
    Ok(())
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<()> {
    info!("Starting probe operation");

    let report = container
        .probe_interactor()
        .probe(&args.input)
        .await
        .context("Could not determine video duration")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize probe report to JSON")?;
        println!("{}", json);
    } else {
        display_probe_report(&report);
    }
    Ok(())
}

fn progress_callback(mode: ProgressMode) -> Box<dyn ProgressCallback> {
    match mode {
        ProgressMode::Bar => Box::new(ConsoleProgressCallback::new()),
        ProgressMode::Json => Box::new(JsonProgressCallback),
        ProgressMode::None => Box::new(NoOpProgressCallback),
    }
}

/// Display probe result in human-readable format
fn display_probe_report(report: &ProbeReport) {
    println!("File: {}", report.path.display());
    println!("Duration: {} ({:.3}s)", report.duration, report.duration_seconds);
}
