//! Repository trait definitions.

use behemoth_core::{BehemothResult, Interface, Profile, ProfileId};
use async_trait::async_trait;

/// Profile repository trait.
///
/// The database is the system of record for profiles; implementations never
/// consult the cache.
#[async_trait]
pub trait ProfileRepository: Interface + Send + Sync {
    /// Finds a profile by ID.
    async fn find_by_id(&self, id: &ProfileId) -> BehemothResult<Option<Profile>>;

    /// Inserts a new profile.
    ///
    /// Fails with `Conflict` when a profile with the same ID already exists.
    async fn insert(&self, profile: &Profile) -> BehemothResult<()>;

    /// Replaces the stored profile with the same ID.
    ///
    /// Fails with `NotFound` when no such profile exists.
    async fn update(&self, profile: &Profile) -> BehemothResult<()>;

    /// Checks that the backing store answers.
    async fn health_check(&self) -> BehemothResult<()>;
}
