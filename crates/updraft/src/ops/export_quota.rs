//! The quota gate.
//!
//! Sequences materialization (cloud assets only), size resolution, the disk
//! gate, the export session and the weekly quota validation as one unit.
//! Failures short-circuit the remaining steps and surface unchanged.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::artifact::ExportResult;
use crate::asset::{AccountIdentity, AssetRef};
use crate::capability::{Capabilities, DestinationConstraints, ProgressFn};
use crate::error::UploadError;
use crate::ops::disk_space::check_disk_space;
use crate::ops::export::run_export;
use crate::progress::{ProgressPhase, ProgressReporter};

pub(crate) struct ExportQuota<'a> {
    pub caps: &'a Capabilities,
    pub account: &'a AccountIdentity,
    pub constraints: &'a DestinationConstraints,
}

impl ExportQuota<'_> {
    pub(crate) async fn run(
        &self,
        asset: &AssetRef,
        reporter: &ProgressReporter,
        token: &CancellationToken,
    ) -> Result<ExportResult, UploadError> {
        // Cloud assets are fetched into a local representation before
        // anything else can be known about them.
        let local_asset = if asset.is_cloud() {
            self.materialize(asset, reporter, token).await?
        } else {
            asset.clone()
        };

        if token.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let required_bytes = self
            .caps
            .exporter
            .estimated_size(&local_asset)
            .await
            .map_err(|err| {
                UploadError::configuration(format!("failed to resolve asset size: {err}"))
            })?;
        debug!(asset = %asset.id, required_bytes, "resolved estimated export size");

        match check_disk_space(
            self.caps.storage.as_ref(),
            &self.constraints.dir,
            required_bytes,
        )
        .await?
        {
            Some(check) if !check.success => {
                return Err(UploadError::InsufficientDiskSpace {
                    available_bytes: check.available_bytes,
                    required_bytes: check.required_bytes,
                });
            }
            // Measured with room to spare, or inconclusive; either way the
            // export may proceed.
            Some(_) | None => {}
        }

        if token.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let export = run_export(
            self.caps.exporter.as_ref(),
            &local_asset,
            self.constraints,
            reporter,
            token,
        )
        .await?;

        let permitted = self
            .caps
            .quota
            .permits(self.account, export.size_bytes())
            .await?;
        if !permitted {
            info!(
                asset = %asset.id,
                size = export.size_bytes(),
                "weekly quota exceeded, discarding export"
            );
            // Dropping `export` here reclaims the file.
            return Err(UploadError::QuotaExceeded {
                size_bytes: export.size_bytes(),
            });
        }

        Ok(export)
    }

    async fn materialize(
        &self,
        asset: &AssetRef,
        reporter: &ProgressReporter,
        token: &CancellationToken,
    ) -> Result<AssetRef, UploadError> {
        let Some(cloud) = self.caps.cloud.as_ref() else {
            return Err(UploadError::configuration(format!(
                "asset `{}` is cloud-resident but no cloud store is configured",
                asset.id
            )));
        };

        let progress = {
            let reporter = reporter.clone();
            Arc::new(move |fraction: f64| reporter.report(ProgressPhase::Materialize, fraction))
                as ProgressFn
        };

        debug!(asset = %asset.id, "materializing cloud asset");
        let local = cloud
            .materialize(asset, progress, token.child_token())
            .await?;
        reporter.report(ProgressPhase::Materialize, 1.0);
        Ok(local)
    }
}
