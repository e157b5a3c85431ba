//! The terminal artifact of a successful create stage.

use serde::{Deserialize, Serialize};

/// Where the exported bytes should be transferred.
///
/// Produced once by the create stage from the remote service's response and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    /// URI of the created remote video record.
    pub video_uri: String,
    /// Link the file bytes should be sent to.
    pub upload_link: String,
    /// View privacy the record was created with.
    pub view_privacy: String,
}

impl UploadTicket {
    pub fn new(
        video_uri: impl Into<String>,
        upload_link: impl Into<String>,
        view_privacy: impl Into<String>,
    ) -> Self {
        Self {
            video_uri: video_uri.into(),
            upload_link: upload_link.into(),
            view_privacy: view_privacy.into(),
        }
    }
}
