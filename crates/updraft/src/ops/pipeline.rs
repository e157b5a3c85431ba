//! The composed upload pipeline.

use async_trait::async_trait;
use operation_common::{Operation, OperationContext};
use tokio::sync::mpsc;
use tracing::info;

use crate::artifact::PreparedUpload;
use crate::asset::{AccountIdentity, AssetRef};
use crate::capability::{Capabilities, DestinationConstraints};
use crate::error::UploadError;
use crate::ops::create_video::run_create;
use crate::ops::export_quota::ExportQuota;
use crate::progress::{ProgressReporter, ProgressUpdate};
use crate::settings::VideoSettings;

/// One cancellable upload preparation: the quota gate, then the create
/// stage.
///
/// The create stage never starts after a gate failure, and either stage's
/// error surfaces unchanged so callers can pattern-match on the original
/// kind. The exported file is reclaimed on every non-success path and handed
/// to the caller inside [`PreparedUpload`] on success.
pub struct UploadPipeline {
    asset: AssetRef,
    account: AccountIdentity,
    settings: Option<VideoSettings>,
    constraints: DestinationConstraints,
    caps: Capabilities,
    progress: mpsc::Sender<ProgressUpdate>,
}

impl UploadPipeline {
    pub fn new(
        asset: AssetRef,
        account: AccountIdentity,
        settings: Option<VideoSettings>,
        constraints: DestinationConstraints,
        caps: Capabilities,
        progress: mpsc::Sender<ProgressUpdate>,
    ) -> Self {
        Self {
            asset,
            account,
            settings,
            constraints,
            caps,
            progress,
        }
    }
}

#[async_trait]
impl Operation for UploadPipeline {
    type Output = PreparedUpload;
    type Error = UploadError;

    fn name(&self) -> &'static str {
        "upload-pipeline"
    }

    async fn execute(
        self: Box<Self>,
        ctx: OperationContext,
    ) -> Result<PreparedUpload, UploadError> {
        let reporter = ProgressReporter::new(ctx.id, self.progress.clone());
        info!(id = %ctx.id, asset = %self.asset.id, "upload pipeline started");

        let gate = ExportQuota {
            caps: &self.caps,
            account: &self.account,
            constraints: &self.constraints,
        };
        let export = gate.run(&self.asset, &reporter, &ctx.token).await?;

        if ctx.token.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let ticket = run_create(
            self.caps.remote.as_ref(),
            &self.account,
            self.settings.as_ref(),
            export.size_bytes(),
            &ctx.token,
        )
        .await?;

        info!(id = %ctx.id, video_uri = %ticket.video_uri, "upload pipeline prepared");
        Ok(PreparedUpload {
            ticket,
            file: export.into_file(),
        })
    }
}
