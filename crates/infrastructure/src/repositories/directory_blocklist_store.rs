//! Directory-of-files blocklist: a name is listed when a file named after
//! its normalized form exists in the directory.

use async_trait::async_trait;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_domain::{DomainError, NormalizedName};
use std::path::PathBuf;
use tracing::{debug, info};

pub struct DirectoryBlocklistStore {
    root: PathBuf,
}

impl DirectoryBlocklistStore {
    /// Opens `root`, which must already exist and be a directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();
        let metadata = tokio::fs::metadata(&root).await.map_err(|e| {
            DomainError::StoreFailure(format!(
                "Cannot open blocklist directory {}: {}",
                root.display(),
                e
            ))
        })?;
        if !metadata.is_dir() {
            return Err(DomainError::StoreFailure(format!(
                "Blocklist path {} is not a directory",
                root.display()
            )));
        }

        info!(path = %root.display(), "Directory blocklist opened");
        Ok(Self { root })
    }

    /// Keys that would escape the directory or cannot name a file.
    fn is_safe_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['/', '\\', '\0'])
    }
}

#[async_trait]
impl BlocklistStore for DirectoryBlocklistStore {
    async fn contains(&self, name: &NormalizedName) -> Result<bool, DomainError> {
        let key = name.as_str();
        if !Self::is_safe_key(key) {
            debug!(domain = %name, "Key cannot be looked up in directory store");
            return Ok(false);
        }

        tokio::fs::try_exists(self.root.join(key))
            .await
            .map_err(|e| DomainError::StoreFailure(format!("{}: {}", key, e)))
    }

    fn backend_name(&self) -> &'static str {
        "directory"
    }
}
