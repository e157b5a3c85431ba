//! Create stage.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::asset::AccountIdentity;
use crate::capability::RemoteCreate;
use crate::descriptor::TaskDescriptor;
use crate::error::UploadError;
use crate::settings::VideoSettings;
use crate::ticket::UploadTicket;

/// Issue the create request, racing it against cancellation.
///
/// The abort is best-effort: dropping the request future stops waiting on
/// the response, but a request already fully sent may still complete
/// server-side.
pub(crate) async fn run_create(
    remote: &dyn RemoteCreate,
    account: &AccountIdentity,
    settings: Option<&VideoSettings>,
    size_hint: u64,
    token: &CancellationToken,
) -> Result<UploadTicket, UploadError> {
    debug!(account = %account, size_hint, "creating remote video record");

    tokio::select! {
        _ = token.cancelled() => Err(UploadError::Cancelled),
        result = remote.create_video(account, settings, size_hint, TaskDescriptor::CreateVideo) => result,
    }
}
