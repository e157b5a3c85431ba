//! Storage-space measurement.

use std::path::Path;

use async_trait::async_trait;
use sysinfo::Disks;

use crate::error::UploadError;

/// Measures free space on the volume that would receive an export.
#[async_trait]
pub trait StorageProbe: Send + Sync {
    /// Free bytes available at `destination`.
    ///
    /// Three outcomes: `Ok(Some(bytes))` when the volume was measured,
    /// `Ok(None)` when it could not be determined (the gate treats this as
    /// inconclusive and lets the pipeline proceed), and `Err` only when the
    /// underlying API reported an explicit, structured failure.
    async fn available_bytes(&self, destination: &Path) -> Result<Option<u64>, UploadError>;
}

/// Production probe backed by the system disk list.
#[derive(Debug, Default)]
pub struct SysinfoStorageProbe {
    disks: parking_lot::Mutex<Disks>,
}

impl SysinfoStorageProbe {
    pub fn new() -> Self {
        Self {
            disks: parking_lot::Mutex::new(Disks::new_with_refreshed_list()),
        }
    }
}

#[async_trait]
impl StorageProbe for SysinfoStorageProbe {
    async fn available_bytes(&self, destination: &Path) -> Result<Option<u64>, UploadError> {
        let mut disks = self.disks.lock();
        disks.refresh(true);

        // The disk with the longest matching mount point is the one that
        // actually holds the destination.
        let destination = destination.to_string_lossy();
        let mut best_match: Option<(&sysinfo::Disk, usize)> = None;

        for disk in disks.list() {
            let mount_point = disk.mount_point().to_string_lossy();
            if destination.starts_with(mount_point.as_ref()) {
                let mount_len = mount_point.len();
                if best_match.is_none_or(|(_, len)| mount_len > len) {
                    best_match = Some((disk, mount_len));
                }
            }
        }

        Ok(best_match.map(|(disk, _)| disk.available_space()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unmatched_destination_is_inconclusive_not_an_error() {
        let probe = SysinfoStorageProbe::new();
        // A path that cannot sit under any mount point.
        let result = probe
            .available_bytes(Path::new("::no-such-volume::"))
            .await
            .expect("probe must not error on an unmatched path");
        assert_eq!(result, None);
    }
}
