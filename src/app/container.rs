use std::sync::Arc;

use tracing::debug;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, RemuxConfig};
use crate::app::{probe_interactor::ProbeInteractor, remux_interactor::RemuxInteractor};
use crate::domain::errors::DomainError;
use crate::engine::progress::ProgressTracker;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn remux_interactor(&self) -> Arc<RemuxInteractor>;
    fn probe_interactor(&self) -> Arc<ProbeInteractor>;
}

pub struct DefaultAppContainer {
    remux_interactor: Arc<RemuxInteractor>,
    probe_interactor: Arc<ProbeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &RemuxConfig) -> Result<Self, DomainError> {
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe_path.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone()));

        let tracker = match &config.progress_pattern {
            Some(pattern) => ProgressTracker::with_pattern(pattern)?,
            None => ProgressTracker::new(),
        };
        debug!("Progress marker pattern: {}", tracker.pattern().as_str());

        let remux_interactor = Arc::new(RemuxInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            tracker,
        ));

        let probe_interactor = Arc::new(ProbeInteractor::new(probe_port as Arc<dyn ProbePort>));

        Ok(Self {
            remux_interactor,
            probe_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn remux_interactor(&self) -> Arc<RemuxInteractor> {
        Arc::clone(&self.remux_interactor)
    }

    fn probe_interactor(&self) -> Arc<ProbeInteractor> {
        Arc::clone(&self.probe_interactor)
    }
}
