//! Cloud asset materialization.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ProgressFn;
use crate::asset::AssetRef;
use crate::error::UploadError;

/// Fetches cloud-resident assets into a local representation.
#[async_trait]
pub trait CloudStore: Send + Sync {
    /// Materialize `asset` locally, returning a local reference to the same
    /// media.
    ///
    /// Implementations forward fetch fractions into `progress` and must
    /// observe `token`, aborting the fetch and discarding partial data when
    /// it fires. Failures are [`UploadError::CloudMaterializationFailed`].
    async fn materialize(
        &self,
        asset: &AssetRef,
        progress: ProgressFn,
        token: CancellationToken,
    ) -> Result<AssetRef, UploadError>;
}
