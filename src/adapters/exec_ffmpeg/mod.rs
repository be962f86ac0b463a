//! FFmpeg execution adapter
//!
//! Spawns `ffmpeg` for a remux plan and streams its stdout and stderr back
//! as one sequence of lines. ffmpeg rewrites its status line with carriage
//! returns, so `\r` ends a line just like `\n`.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const READ_CHUNK: usize = 8 * 1024;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter for the given executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn spawn(&self, plan: &RemuxPlan) -> Result<Box<dyn RunningOperation>, DomainError> {
        let args = plan.ffmpeg_args();
        debug!(
            "Spawning {} {}",
            self.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let process = ProcessLines::start(cmd)?;
        Ok(Box::new(process))
    }
}

/// Running child process with both output pipes merged into one line channel
pub struct ProcessLines {
    child: Child,
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
    readers: Vec<JoinHandle<()>>,
    read_failed: bool,
}

impl ProcessLines {
    /// Spawn `cmd` with piped stdout/stderr and start draining both pipes
    pub fn start(mut cmd: Command) -> Result<Self, DomainError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::ProcessError(format!(
                    "ffmpeg not found at '{}'",
                    cmd.as_std().get_program().to_string_lossy()
                ))
            } else {
                DomainError::ProcessError(format!("Failed to start ffmpeg: {}", e))
            }
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(pump_lines(stdout, tx.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(pump_lines(stderr, tx)));
        }

        Ok(Self {
            child,
            lines: rx,
            readers,
            read_failed: false,
        })
    }
}

#[async_trait]
impl RunningOperation for ProcessLines {
    async fn next_line(&mut self) -> Result<Option<String>, DomainError> {
        match self.lines.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => {
                self.read_failed = true;
                Err(DomainError::ProcessError(format!(
                    "Failed to read ffmpeg output: {}",
                    e
                )))
            }
            None => Ok(None),
        }
    }

    /// Wait for exit. A child whose output could not be read is killed
    /// first, since nothing drains the broken pipe any more.
    async fn wait(&mut self) -> Result<OperationExit, DomainError> {
        if self.read_failed {
            warn!("Killing ffmpeg after output read failure");
            if let Err(e) = self.child.start_kill() {
                warn!("Failed to kill ffmpeg: {}", e);
            }
        }

        let status = self
            .child
            .wait()
            .await
            .map_err(|e| DomainError::ProcessError(format!("Failed to wait for ffmpeg: {}", e)))?;

        for reader in self.readers.drain(..) {
            if let Err(e) = reader.await {
                warn!("Output reader task failed: {}", e);
            }
        }

        Ok(OperationExit {
            success: status.success(),
            code: status.code(),
        })
    }
}

async fn pump_lines<R>(mut reader: R, tx: mpsc::UnboundedSender<std::io::Result<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut splitter = LineSplitter::default();
    let mut buf = vec![0u8; READ_CHUNK];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                if let Some(rest) = splitter.flush() {
                    let _ = tx.send(Ok(rest));
                }
                return;
            }
            Ok(n) => {
                for line in splitter.push(&buf[..n]) {
                    if tx.send(Ok(line)).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

/// Splits a byte stream on `\r` and `\n`, dropping empty segments
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Consume a chunk, returning every line it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\r' || byte == b'\n' {
                if let Some(line) = self.take() {
                    lines.push(line);
                }
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    /// Return the unterminated tail, if any
    pub fn flush(&mut self) -> Option<String> {
        self.take()
    }

    fn take(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(line)
    }
}
