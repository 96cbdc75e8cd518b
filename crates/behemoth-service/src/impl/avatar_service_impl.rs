//! Avatar upload service implementation.

use crate::avatar_service::AvatarService;
use crate::dto::UploadImageResponse;
use crate::profile_service::ProfileService;
use crate::storage::{avatar_blob_name, image_extension, BlobStore};
use async_trait::async_trait;
use behemoth_core::{BehemothError, BehemothResult, ProfileId};
use behemoth_repository::ProfileRepository;
use chrono::Utc;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Uploads avatar images to the blob store and records them on the profile.
#[derive(Component)]
#[shaku(interface = AvatarService)]
pub struct AvatarServiceImpl {
    #[shaku(inject)]
    profiles: Arc<dyn ProfileService>,
    #[shaku(inject)]
    repository: Arc<dyn ProfileRepository>,
    #[shaku(inject)]
    blobs: Arc<dyn BlobStore>,
}

impl AvatarServiceImpl {
    /// Creates a new avatar service.
    pub fn new(
        profiles: Arc<dyn ProfileService>,
        repository: Arc<dyn ProfileRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            profiles,
            repository,
            blobs,
        }
    }
}

#[async_trait]
impl AvatarService for AvatarServiceImpl {
    async fn upload_avatar(
        &self,
        id: &ProfileId,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> BehemothResult<UploadImageResponse> {
        debug!("Uploading avatar for profile: {} ({} bytes)", id, bytes.len());

        if bytes.is_empty() {
            return Err(BehemothError::validation("Avatar image must not be empty"));
        }
        let (mime, extension) = image_extension(content_type)?;

        // No blob is written for a profile that does not exist.
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(BehemothError::not_found("Profile", id));
        }

        let unix_nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let name = avatar_blob_name(id, unix_nanos, &extension);
        let url = self.blobs.upload(&name, &mime, bytes).await?;

        self.profiles.update_avatar(id, url.clone()).await?;

        info!("Avatar uploaded for profile {}: {}", id, name);
        Ok(UploadImageResponse { url })
    }
}
