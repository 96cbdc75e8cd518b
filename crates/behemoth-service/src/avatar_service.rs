//! Avatar upload service trait definition.

use crate::dto::UploadImageResponse;
use async_trait::async_trait;
use behemoth_core::{BehemothResult, Interface, ProfileId};

/// Stores avatar images and links them to profiles.
#[async_trait]
pub trait AvatarService: Interface + Send + Sync {
    /// Uploads an image and records its URL on the caller's profile.
    ///
    /// The profile must already exist; nothing is stored otherwise.
    async fn upload_avatar(
        &self,
        id: &ProfileId,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> BehemothResult<UploadImageResponse>;
}
