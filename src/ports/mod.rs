// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Total duration of the media file
    async fn probe_duration(&self, file_path: &Path) -> Result<MediaDuration, DomainError>;
}

/// Port for launching the remux operation
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Start the operation described by `plan`
    async fn spawn(&self, plan: &RemuxPlan) -> Result<Box<dyn RunningOperation>, DomainError>;
}

/// A started external operation whose combined output is read line by line
#[async_trait]
pub trait RunningOperation: Send {
    /// Next line of combined stdout/stderr, `None` once both streams are closed
    async fn next_line(&mut self) -> Result<Option<String>, DomainError>;

    /// Wait for the process to exit
    async fn wait(&mut self) -> Result<OperationExit, DomainError>;
}
