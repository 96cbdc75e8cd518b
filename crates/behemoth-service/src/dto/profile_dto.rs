//! Profile DTOs.

use behemoth_core::{
    field_errors, rules, BehemothError, BehemothResult, FieldError, Profile,
    USERNAME_MAX_LEN,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Public projection of a profile.
///
/// This is both the HTTP response body and the value stored in the cache.
/// The id is never part of it; it is implied by the caller's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "hi")]
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            username: profile.username,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
        }
    }
}

/// Request to replace the caller's username and bio.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    #[schema(example = "alice", max_length = 50)]
    pub username: String,

    #[validate(length(max = 500, message = "Bio cannot exceed 500 characters"))]
    #[schema(example = "hi", max_length = 500)]
    #[serde(default)]
    pub bio: Option<String>,
}

impl UpdateProfileRequest {
    /// Validates the request, also rejecting whitespace-only usernames.
    pub fn validate_details(&self) -> BehemothResult<()> {
        let mut details = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_errors(&errors),
        };

        if !self.username.is_empty() && rules::not_blank(&self.username).is_err() {
            details.push(FieldError {
                field: "username".to_string(),
                message: format!("Username must be 1-{} non-blank characters", USERNAME_MAX_LEN),
                code: "not_blank".to_string(),
            });
        }

        if details.is_empty() {
            return Ok(());
        }

        let message = details
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(BehemothError::Validation { message, details })
    }
}

/// Response of a successful avatar upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadImageResponse {
    /// Public URL of the stored image.
    #[schema(example = "http://localhost:8080/blobs/avatars/u1-1718000000000000000.png")]
    pub url: String,
}
