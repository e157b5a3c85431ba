//! Asset references.
//!
//! An asset is either already present on the local filesystem or resident in
//! a cloud library and must be materialized before it can be exported. The
//! residency is fixed when the reference is built; the pipeline never mutates
//! an asset reference, it only derives a local one from a cloud one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the asset's bytes currently live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum AssetResidency {
    /// Present on the local filesystem.
    Local { path: PathBuf },
    /// Resident in a cloud library, addressed by a remote identifier.
    Cloud { remote_id: String },
}

/// Reference to a media asset owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Caller-chosen identifier, stable across the life of the upload.
    pub id: String,
    pub residency: AssetResidency,
}

impl AssetRef {
    pub fn local(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            residency: AssetResidency::Local { path: path.into() },
        }
    }

    pub fn cloud(id: impl Into<String>, remote_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residency: AssetResidency::Cloud {
                remote_id: remote_id.into(),
            },
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self.residency, AssetResidency::Cloud { .. })
    }

    /// Local path, if the asset is local.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.residency {
            AssetResidency::Local { path } => Some(path),
            AssetResidency::Cloud { .. } => None,
        }
    }
}

/// Identity of the account performing the upload, as a remote user URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub user_uri: String,
}

impl AccountIdentity {
    pub fn new(user_uri: impl Into<String>) -> Self {
        Self {
            user_uri: user_uri.into(),
        }
    }
}

impl std::fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_asset_exposes_path() {
        let asset = AssetRef::local("clip-1", "/media/clip.mov");
        assert!(!asset.is_cloud());
        assert_eq!(asset.local_path(), Some(Path::new("/media/clip.mov")));
    }

    #[test]
    fn test_cloud_asset_has_no_local_path() {
        let asset = AssetRef::cloud("clip-2", "ph://abc123");
        assert!(asset.is_cloud());
        assert_eq!(asset.local_path(), None);
    }
}
