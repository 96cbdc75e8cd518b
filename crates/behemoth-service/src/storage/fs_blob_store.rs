//! Filesystem blob store.

use super::BlobStore;
use async_trait::async_trait;
use behemoth_config::StorageConfig;
use behemoth_core::{BehemothError, BehemothResult, HealthCheck, HealthStatus};
use shaku::Component;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Blob store writing into `<root_dir>/<container>/`.
///
/// The server exposes `root_dir` read-only, so the returned URL is
/// `<public_base_url>/<container>/<name>`.
#[derive(Component, Debug, Clone)]
#[shaku(interface = BlobStore)]
pub struct FsBlobStore {
    root_dir: PathBuf,
    container: String,
    public_base_url: String,
}

impl FsBlobStore {
    /// Creates a blob store from configuration.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root_dir: PathBuf::from(&config.root_dir),
            container: config.container.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Directory served as the public blob root.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Parameters that build a component writing to the same container.
    #[must_use]
    pub fn component_parameters(&self) -> FsBlobStoreParameters {
        FsBlobStoreParameters {
            root_dir: self.root_dir.clone(),
            container: self.container.clone(),
            public_base_url: self.public_base_url.clone(),
        }
    }

    fn container_dir(&self) -> PathBuf {
        self.root_dir.join(&self.container)
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.container, name)
    }
}

fn check_name(name: &str) -> BehemothResult<()> {
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(BehemothError::internal(format!("Invalid blob name '{}'", name)));
    }
    Ok(())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload(&self, name: &str, content_type: &str, bytes: &[u8]) -> BehemothResult<String> {
        check_name(name)?;

        let dir = self.container_dir();
        let target = dir.join(name);
        let partial = dir.join(format!(".{}.partial", name));

        // Readers never see a half-written blob.
        tokio::fs::write(&partial, bytes).await?;
        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        debug!(
            "Stored blob '{}' ({} bytes, {}) in {}",
            name,
            bytes.len(),
            content_type,
            dir.display()
        );
        Ok(self.public_url(name))
    }

    async fn ensure_container(&self) -> BehemothResult<()> {
        let dir = self.container_dir();
        tokio::fs::create_dir_all(&dir).await?;
        info!("Blob container ready at {}", dir.display());
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for FsBlobStore {
    fn name(&self) -> &str {
        "blob_store"
    }

    async fn check(&self) -> HealthStatus {
        match tokio::fs::metadata(self.container_dir()).await {
            Ok(meta) if meta.is_dir() => HealthStatus::Healthy,
            Ok(_) => HealthStatus::Unhealthy("blob container is not a directory".to_string()),
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
