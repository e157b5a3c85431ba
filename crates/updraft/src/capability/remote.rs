//! Remote video record creation.

use async_trait::async_trait;

use crate::asset::AccountIdentity;
use crate::descriptor::TaskDescriptor;
use crate::error::UploadError;
use crate::settings::VideoSettings;
use crate::ticket::UploadTicket;

/// Issues the "create video record" request against the remote service.
///
/// Shared and reentrant across pipelines, like [`QuotaCheck`](super::QuotaCheck).
#[async_trait]
pub trait RemoteCreate: Send + Sync {
    /// Create a remote video record sized around `size_hint` and return its
    /// upload ticket.
    ///
    /// Implementations must tag the transport task they issue with
    /// `descriptor` so a resumed background task can be re-associated with
    /// its pipeline after a process restart. Failures are
    /// [`UploadError::RemoteCreateFailed`].
    async fn create_video(
        &self,
        account: &AccountIdentity,
        settings: Option<&VideoSettings>,
        size_hint: u64,
        descriptor: TaskDescriptor,
    ) -> Result<UploadTicket, UploadError>;
}
