//! Upload quota validation.

use async_trait::async_trait;

use crate::asset::AccountIdentity;
use crate::error::UploadError;

/// Validates a byte size against an account's remaining weekly quota.
///
/// Shared and reentrant: many pipelines may call it concurrently, and
/// correctness under concurrent checks is the remote service's problem, not
/// the caller's.
#[async_trait]
pub trait QuotaCheck: Send + Sync {
    /// Whether the account's remaining quota permits `size_bytes`. Transport
    /// failures are [`UploadError::QuotaCheckFailed`].
    async fn permits(
        &self,
        account: &AccountIdentity,
        size_bytes: u64,
    ) -> Result<bool, UploadError>;
}
