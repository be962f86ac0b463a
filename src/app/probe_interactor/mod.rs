// Probe interactor - Orchestrates the duration probe use case

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for probing a media file's duration
pub struct ProbeInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl ProbeInteractor {
    /// Create new probe interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Probe the duration of the file at `input_path`
    pub async fn probe(&self, input_path: &str) -> Result<ProbeReport, DomainError> {
        let path = PathUtils::new()
            .normalize_user_path(input_path)
            .map_err(|_| DomainError::BadArgs("Input path is empty".to_string()))?;

        if !path.exists() {
            return Err(DomainError::FileNotFound(path.display().to_string()));
        }

        let duration = self.probe_port.probe_duration(&path).await?;
        info!("Probed {}: {}", path.display(), duration);

        Ok(ProbeReport {
            path,
            duration_seconds: duration.as_seconds(),
            duration: duration.to_string(),
        })
    }
}
