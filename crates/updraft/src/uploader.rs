//! The uploader front-end.

use operation_common::{OperationHandle, OperationQueue, Outcome};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::artifact::PreparedUpload;
use crate::asset::{AccountIdentity, AssetRef};
use crate::capability::{Capabilities, DestinationConstraints};
use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::ops::pipeline::UploadPipeline;
use crate::progress::ProgressUpdate;
use crate::settings::VideoSettings;

/// Handle to one submitted upload.
///
/// Supports `cancel()` and a one-shot `join()` resolving with the terminal
/// [`Outcome`]: the prepared upload, the original stage error, or
/// `Cancelled`.
pub type UploadHandle = OperationHandle<PreparedUpload, UploadError>;

/// Wires capabilities, configuration and the operation queue into a single
/// `submit` call per asset. Pipelines run concurrently up to the queue
/// bound, each independently cancellable.
pub struct Uploader {
    config: UploaderConfig,
    caps: Capabilities,
    queue: OperationQueue,
    progress_tx: mpsc::Sender<ProgressUpdate>,
    progress_rx: parking_lot::Mutex<Option<mpsc::Receiver<ProgressUpdate>>>,
}

impl Uploader {
    pub fn new(caps: Capabilities) -> Self {
        Self::with_config(caps, UploaderConfig::default())
    }

    pub fn with_config(caps: Capabilities, config: UploaderConfig) -> Self {
        let (progress_tx, progress_rx) = mpsc::channel(config.progress_capacity);
        let queue = OperationQueue::with_config(config.queue.clone());
        info!(
            max_concurrent = config.queue.max_concurrent,
            export_dir = %config.export_dir.display(),
            "uploader ready"
        );
        Self {
            config,
            caps,
            queue,
            progress_tx,
            progress_rx: parking_lot::Mutex::new(Some(progress_rx)),
        }
    }

    /// Submit an asset for upload preparation.
    ///
    /// Returns immediately; the pipeline runs on the uploader's queue. A
    /// cloud asset submitted without a configured cloud store resolves the
    /// handle immediately with a configuration error, before any stage runs.
    pub fn submit(
        &self,
        asset: AssetRef,
        account: AccountIdentity,
        settings: Option<VideoSettings>,
    ) -> UploadHandle {
        if asset.is_cloud() && self.caps.cloud.is_none() {
            debug!(asset = %asset.id, "rejecting cloud asset, no cloud store configured");
            return OperationHandle::settled(
                "upload-pipeline",
                Outcome::Failed(UploadError::configuration(format!(
                    "asset `{}` is cloud-resident but no cloud store is configured",
                    asset.id
                ))),
            );
        }

        let settings = settings.or_else(|| {
            self.config
                .default_privacy
                .clone()
                .map(VideoSettings::with_privacy)
        });

        let constraints = DestinationConstraints::new(
            self.config.export_dir.clone(),
            format!("upload-{}", Uuid::new_v4()),
        );

        let pipeline = UploadPipeline::new(
            asset,
            account,
            settings,
            constraints,
            self.caps.clone(),
            self.progress_tx.clone(),
        );
        self.queue.submit(pipeline)
    }

    /// Take the progress stream. It carries updates for every pipeline this
    /// uploader runs, tagged by submission id; available once.
    pub fn take_progress(&self) -> Option<mpsc::Receiver<ProgressUpdate>> {
        self.progress_rx.lock().take()
    }

    /// Cancel in-flight pipelines and wait for them to settle.
    pub async fn shutdown(&self) {
        self.queue.shutdown().await;
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    pub fn active_count(&self) -> usize {
        self.queue.active_count()
    }
}
