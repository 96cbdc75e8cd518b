//! Profile service trait definition.

use crate::dto::{ProfileResponse, UpdateProfileRequest};
use async_trait::async_trait;
use behemoth_core::{BehemothResult, Interface, Profile, ProfileId};

/// Cache-aside store for profiles.
#[async_trait]
pub trait ProfileService: Interface + Send + Sync {
    /// Returns the caller's public projection, creating an empty profile on
    /// first access.
    ///
    /// A cache hit is returned as stored; the database timestamps are not
    /// part of the projection.
    async fn get_or_create(&self, id: &ProfileId) -> BehemothResult<ProfileResponse>;

    /// Replaces username and bio of an existing profile.
    ///
    /// Fails with `NotFound` when the profile was never created.
    async fn update(&self, id: &ProfileId, request: UpdateProfileRequest) -> BehemothResult<Profile>;

    /// Replaces the avatar URL of an existing profile.
    ///
    /// Fails with `NotFound` when the profile was never created.
    async fn update_avatar(&self, id: &ProfileId, avatar_url: String) -> BehemothResult<Profile>;
}
