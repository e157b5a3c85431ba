#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload cancelled")]
    Cancelled,

    #[error("cannot calculate available disk space: {reason}")]
    CannotCalculateDiskSpace { reason: String },

    #[error(
        "insufficient disk space: {available_bytes} bytes available, {required_bytes} bytes required"
    )]
    InsufficientDiskSpace {
        available_bytes: u64,
        required_bytes: u64,
    },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("export session cancelled")]
    ExportCancelled,

    #[error("cloud materialization failed: {reason}")]
    CloudMaterializationFailed { reason: String },

    #[error("quota check failed: {reason}")]
    QuotaCheckFailed { reason: String },

    #[error("upload quota exceeded for {size_bytes} bytes")]
    QuotaExceeded { size_bytes: u64 },

    #[error("remote create failed: {reason}")]
    RemoteCreateFailed { reason: String },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl UploadError {
    pub fn cannot_calculate_disk_space(reason: impl Into<String>) -> Self {
        Self::CannotCalculateDiskSpace {
            reason: reason.into(),
        }
    }

    pub fn export_failed(reason: impl Into<String>) -> Self {
        Self::ExportFailed {
            reason: reason.into(),
        }
    }

    pub fn cloud_materialization_failed(reason: impl Into<String>) -> Self {
        Self::CloudMaterializationFailed {
            reason: reason.into(),
        }
    }

    pub fn quota_check_failed(reason: impl Into<String>) -> Self {
        Self::QuotaCheckFailed {
            reason: reason.into(),
        }
    }

    pub fn remote_create_failed(reason: impl Into<String>) -> Self {
        Self::RemoteCreateFailed {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Whether retrying the whole pipeline could plausibly succeed without
    /// the caller changing anything.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cancelled
            | Self::CannotCalculateDiskSpace { .. }
            | Self::InsufficientDiskSpace { .. }
            | Self::ExportFailed { .. }
            | Self::ExportCancelled
            | Self::QuotaExceeded { .. }
            | Self::Configuration { .. } => false,
            Self::CloudMaterializationFailed { .. }
            | Self::QuotaCheckFailed { .. }
            | Self::RemoteCreateFailed { .. }
            | Self::Io { .. } => true,
        }
    }
}
