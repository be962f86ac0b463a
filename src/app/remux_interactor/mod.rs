// Remux interactor - Orchestrates the remux use case

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::progress::{ProgressCallback, ProgressTracker};
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Lines of tool output kept for error reports
pub const OUTPUT_TAIL_LINES: usize = 20;

/// Interactor for the remux use case
pub struct RemuxInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    tracker: ProgressTracker,
}

impl RemuxInteractor {
    /// Create new remux interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        tracker: ProgressTracker,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            tracker,
        }
    }

    /// Resolve a user request into a concrete plan, checking the filesystem
    pub fn plan(&self, request: &RemuxRequest) -> Result<RemuxPlan, DomainError> {
        let paths = PathUtils::new();

        let input = paths
            .normalize_user_path(&request.input_path)
            .map_err(|_| DomainError::BadArgs("Input path is empty".to_string()))?;
        if !input.exists() {
            return Err(DomainError::FileNotFound(input.display().to_string()));
        }
        if !input.is_file() {
            return Err(DomainError::BadArgs(format!(
                "Input is not a regular file: {}",
                input.display()
            )));
        }

        let output = match request.output_path.as_deref() {
            Some(raw) => paths
                .normalize_user_path(raw)
                .map_err(|_| DomainError::BadArgs("Output path is empty".to_string()))?,
            None => paths
                .sibling_with_tag(&input, &request.audio.codec)
                .map_err(|e| DomainError::BadArgs(e.to_string()))?,
        };

        if same_file(&input, &output) {
            return Err(DomainError::BadArgs(format!(
                "Output path must differ from input: {}",
                output.display()
            )));
        }
        if output.exists() && !request.overwrite {
            return Err(DomainError::BadArgs(format!(
                "Output file already exists: {} (use --overwrite to replace it)",
                output.display()
            )));
        }

        Ok(RemuxPlan {
            input,
            output,
            audio: request.audio.clone(),
            overwrite: request.overwrite,
        })
    }

    /// Execute one remux, reporting progress through `callback`.
    ///
    /// The callback sees 100 only when ffmpeg exits successfully; on failure
    /// it keeps the last percentage and receives `on_error`.
    pub async fn remux(
        &self,
        request: RemuxRequest,
        callback: &dyn ProgressCallback,
    ) -> Result<RemuxReport, DomainError> {
        let plan = self.plan(&request)?;
        info!("Input: {}", plan.input.display());
        info!("Output: {}", plan.output.display());

        let duration = self.probe_port.probe_duration(&plan.input).await?;
        info!("Duration: {} ({:.3}s)", duration, duration.as_seconds());

        let mut session = self.tracker.begin(duration.as_seconds())?;
        let started = Instant::now();

        callback.on_start(
            &format!(
                "Remuxing {} -> {} (audio: {} @ {})",
                plan.input.display(),
                plan.output.display(),
                plan.audio.codec,
                plan.audio.bitrate
            ),
            duration.as_seconds(),
        );

        let mut operation = match self.execute_port.spawn(&plan).await {
            Ok(operation) => operation,
            Err(e) => {
                callback.on_error(&e.to_string());
                error!("Failed to start remux: {}", e);
                return Err(e);
            }
        };

        let mut tail: VecDeque<String> = VecDeque::with_capacity(OUTPUT_TAIL_LINES);
        let mut lines_seen: u64 = 0;
        loop {
            match operation.next_line().await {
                Ok(Some(line)) => {
                    lines_seen += 1;
                    if let Some(percent) = session.observe(&line) {
                        debug!("Progress: {}%", percent);
                        callback.on_progress(percent);
                    }
                    if tail.len() == OUTPUT_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopped reading ffmpeg output: {}", e);
                    break;
                }
            }
        }

        let exit = match operation.wait().await {
            Ok(exit) => exit,
            Err(e) => {
                callback.on_error(&e.to_string());
                error!("{}", e);
                return Err(e);
            }
        };

        if !exit.success {
            let err = DomainError::ExecutionFailed {
                code: exit.code,
                output_tail: tail.into_iter().collect(),
            };
            callback.on_error(&err.to_string());
            error!("Remux failed at {}%: {}", session.last_reported(), err);
            return Err(err);
        }

        let already_complete = session.last_reported() == 100;
        let final_percent = session.finish();
        if !already_complete {
            callback.on_progress(final_percent);
        }

        let message = format!("Remux complete! File saved to: {}", plan.output.display());
        info!("{}", message);
        callback.on_complete(&message);

        Ok(RemuxReport {
            input: plan.input,
            output: plan.output,
            duration_seconds: duration.as_seconds(),
            final_percent,
            lines_seen,
            markers_seen: session.markers_seen(),
            elapsed: started.elapsed(),
        })
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (canonical(a), canonical(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn canonical(path: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(path).ok()
}
