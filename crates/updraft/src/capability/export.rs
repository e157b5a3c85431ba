//! Asset export.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ProgressFn;
use crate::asset::AssetRef;
use crate::error::UploadError;

/// Constraints on where an export lands.
#[derive(Debug, Clone)]
pub struct DestinationConstraints {
    /// Directory the deliverable file is created in.
    pub dir: PathBuf,
    /// Stem for the output file name; the exporter picks the container
    /// extension.
    pub file_stem: String,
}

impl DestinationConstraints {
    pub fn new(dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_stem: file_stem.into(),
        }
    }
}

/// Raw output of an export session.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Converts an asset into a deliverable local file.
#[async_trait]
pub trait MediaExporter: Send + Sync {
    /// Estimated size in bytes of the deliverable for `asset`, consumed by
    /// the disk gate before any export work starts. An error means the asset
    /// cannot be resolved at all.
    async fn estimated_size(&self, asset: &AssetRef) -> Result<u64, UploadError>;

    /// Run the export session to completion.
    ///
    /// Implementations forward completion fractions into `progress` and must
    /// observe `token`: an abort has to stop the session within a bounded
    /// time, remove any partial output, and return
    /// [`UploadError::ExportCancelled`]. Other failures are
    /// [`UploadError::ExportFailed`]. A success result must never be
    /// delivered after the token fired.
    async fn export(
        &self,
        asset: &AssetRef,
        constraints: &DestinationConstraints,
        progress: ProgressFn,
        token: CancellationToken,
    ) -> Result<ExportOutput, UploadError>;
}
