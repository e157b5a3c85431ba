//! Export stage.
//!
//! Drives the export capability with progress and cancellation wired
//! through, and takes ownership of the output file the moment it exists.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::artifact::{ExportResult, ExportedFile};
use crate::asset::AssetRef;
use crate::capability::{DestinationConstraints, MediaExporter, ProgressFn};
use crate::error::UploadError;
use crate::progress::{ProgressPhase, ProgressReporter};

pub(crate) async fn run_export(
    exporter: &dyn MediaExporter,
    asset: &AssetRef,
    constraints: &DestinationConstraints,
    reporter: &ProgressReporter,
    token: &CancellationToken,
) -> Result<ExportResult, UploadError> {
    if token.is_cancelled() {
        return Err(UploadError::Cancelled);
    }

    tokio::fs::create_dir_all(&constraints.dir).await?;

    let progress = {
        let reporter = reporter.clone();
        Arc::new(move |fraction: f64| reporter.report(ProgressPhase::Export, fraction)) as ProgressFn
    };

    debug!(asset = %asset.id, dir = %constraints.dir.display(), "starting export session");
    let output = exporter
        .export(asset, constraints, progress, token.child_token())
        .await?;

    reporter.report(ProgressPhase::Export, 1.0);
    debug!(
        asset = %asset.id,
        path = %output.path.display(),
        size = output.size_bytes,
        "export session finished"
    );

    Ok(ExportResult::new(
        ExportedFile::new(output.path),
        output.size_bytes,
    ))
}
