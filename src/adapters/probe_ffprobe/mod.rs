//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe` and reads the container duration from its plain-text
//! output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter for the given executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn duration_command(&self, file_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(file_path);
        cmd
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<MediaDuration, DomainError> {
        debug!("Probing duration of {}", file_path.display());
        let duration = run_duration_command(self.duration_command(file_path), &self.program).await?;
        debug!("Probed duration: {:.3}s", duration.as_seconds());
        Ok(duration)
    }
}

/// Run a probe command and parse its stdout as seconds
pub(crate) async fn run_duration_command(
    mut cmd: Command,
    program: &Path,
) -> Result<MediaDuration, DomainError> {
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::DurationUnavailable(format!(
                    "ffprobe not found at '{}'",
                    program.display()
                ))
            } else {
                DomainError::DurationUnavailable(format!("Failed to run ffprobe: {}", e))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DomainError::DurationUnavailable(format!(
            "ffprobe exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    MediaDuration::from_probe_output(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_ffprobe_is_duration_unavailable() {
        let adapter = FFprobeAdapter::new("/definitely/not/here/ffprobe");
        let result = adapter.probe_duration(Path::new("movie.mkv")).await;
        match result {
            Err(DomainError::DurationUnavailable(msg)) => assert!(msg.contains("not found")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    fn shell(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_parses_duration_output() {
        let duration = run_duration_command(shell("echo 1234.560000"), Path::new("sh"))
            .await
            .unwrap();
        assert_eq!(duration.as_seconds(), 1234.56);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_reports_stderr() {
        let result = run_duration_command(
            shell("echo 'movie.mkv: No such file or directory' >&2; exit 1"),
            Path::new("sh"),
        )
        .await;
        match result {
            Err(DomainError::DurationUnavailable(msg)) => {
                assert!(msg.contains("No such file or directory"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_na_duration_is_rejected() {
        let result = run_duration_command(shell("echo N/A"), Path::new("sh")).await;
        assert!(matches!(result, Err(DomainError::DurationUnavailable(_))));
    }
}
