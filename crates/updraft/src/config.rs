//! Uploader configuration.

use std::path::PathBuf;

use operation_common::QueueConfig;
use serde::{Deserialize, Serialize};

/// Configurable options for the uploader front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Queue bounds for pipeline execution.
    pub queue: QueueConfig,

    /// Directory exported deliverables are written to.
    pub export_dir: PathBuf,

    /// View privacy applied when a submission carries no settings.
    pub default_privacy: Option<String>,

    /// Capacity of the progress channel. A full channel drops updates rather
    /// than stalling a pipeline.
    pub progress_capacity: usize,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            // Uploads are prepared one at a time by default; raise this to
            // run several pipelines in parallel.
            queue: QueueConfig {
                max_concurrent: 1,
                ..QueueConfig::default()
            },
            export_dir: std::env::temp_dir().join("updraft-exports"),
            default_privacy: None,
            progress_capacity: 64,
        }
    }
}

impl UploaderConfig {
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_default_privacy(mut self, privacy: impl Into<String>) -> Self {
        self.default_privacy = Some(privacy.into());
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.queue.max_concurrent = max_concurrent;
        self
    }
}
