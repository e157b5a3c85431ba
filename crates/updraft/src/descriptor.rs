//! Tags for in-flight transport tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Identifies which network call produced a transport task.
///
/// The tag is recorded on the task at creation time and parsed back after a
/// process restart to re-associate a resumed background task with its
/// pipeline. The string forms are part of that on-disk contract and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskDescriptor {
    CreateVideo,
    UploadVideo,
    ActivateVideo,
    VideoSettings,
}

impl TaskDescriptor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDescriptor::CreateVideo => "CreateVideo",
            TaskDescriptor::UploadVideo => "UploadVideo",
            TaskDescriptor::ActivateVideo => "ActivateVideo",
            TaskDescriptor::VideoSettings => "VideoSettings",
        }
    }
}

impl std::fmt::Display for TaskDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskDescriptor {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CreateVideo" => Ok(TaskDescriptor::CreateVideo),
            "UploadVideo" => Ok(TaskDescriptor::UploadVideo),
            "ActivateVideo" => Ok(TaskDescriptor::ActivateVideo),
            "VideoSettings" => Ok(TaskDescriptor::VideoSettings),
            other => Err(UploadError::configuration(format!(
                "unknown task descriptor `{other}`"
            ))),
        }
    }
}
