//! Disk-space gate.
//!
//! Insufficient space is a measurement result, not an error; the caller
//! decides what to do with it. An inconclusive measurement fails open so an
//! inability to measure never blocks an upload that would otherwise succeed.

use std::path::Path;

use tracing::{debug, warn};

use crate::capability::StorageProbe;
use crate::error::UploadError;

/// Result of a completed disk-space measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeCheckResult {
    pub required_bytes: u64,
    pub available_bytes: u64,
    /// Whether available space exceeds the required size.
    pub success: bool,
}

/// Measure free space at `destination` against `required_bytes`.
///
/// * `Ok(Some(result))`: the volume was measured; `result.success` says
///   whether space exceeds the requirement.
/// * `Ok(None)`: the probe could not determine the space; inconclusive.
/// * `Err(CannotCalculateDiskSpace)`: the probe reported an explicit
///   failure.
pub async fn check_disk_space(
    probe: &dyn StorageProbe,
    destination: &Path,
    required_bytes: u64,
) -> Result<Option<FileSizeCheckResult>, UploadError> {
    let available = probe
        .available_bytes(destination)
        .await
        .map_err(|err| match err {
            UploadError::CannotCalculateDiskSpace { .. } => err,
            other => UploadError::cannot_calculate_disk_space(other.to_string()),
        })?;

    match available {
        Some(available_bytes) => {
            let success = available_bytes > required_bytes;
            if success {
                debug!(
                    "Disk space OK: {} bytes available, {} bytes required",
                    available_bytes, required_bytes
                );
            } else {
                warn!(
                    "Insufficient disk space: {} bytes available, {} bytes required",
                    available_bytes, required_bytes
                );
            }
            Ok(Some(FileSizeCheckResult {
                required_bytes,
                available_bytes,
                success,
            }))
        }
        None => {
            warn!(
                "Could not determine disk space for {}, proceeding",
                destination.display()
            );
            Ok(None)
        }
    }
}
