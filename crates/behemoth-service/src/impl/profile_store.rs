//! Cache-aside profile store.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{ProfileResponse, UpdateProfileRequest};
use crate::metrics::ProfileMetrics;
use crate::profile_service::ProfileService;
use async_trait::async_trait;
use behemoth_config::CacheConfig;
use behemoth_core::{BehemothError, BehemothResult, Profile, ProfileId};
use behemoth_repository::ProfileRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Profile store backed by the database with a Redis read-through cache.
///
/// Reads populate the cache; writes go to the database and then delete the
/// cache entry. Cache failures never fail a request.
#[derive(Component)]
#[shaku(interface = ProfileService)]
pub struct ProfileStore {
    #[shaku(inject)]
    repository: Arc<dyn ProfileRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    key_prefix: String,
    ttl: Option<Duration>,
}

impl ProfileStore {
    /// Creates a new profile store.
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        cache: Arc<dyn CacheInterface>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            repository,
            cache,
            key_prefix: config.key_prefix.clone(),
            ttl: config.profile_ttl(),
        }
    }
}

impl ProfileStoreParameters {
    /// Key prefix and TTL taken from the `cache` section.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            key_prefix: config.key_prefix.clone(),
            ttl: config.profile_ttl(),
        }
    }
}

impl ProfileStore {
    fn cache_key(&self, id: &ProfileId) -> String {
        cache_keys::profile(&self.key_prefix, id)
    }

    /// Unreadable or undecodable entries count as misses.
    async fn read_cached(&self, key: &str, id: &ProfileId) -> Option<ProfileResponse> {
        match self.cache.get::<ProfileResponse>(key).await {
            Ok(Some(cached)) => {
                ProfileMetrics::cache_hit();
                debug!("Cache hit for profile: {}", id);
                Some(cached)
            }
            Ok(None) => {
                ProfileMetrics::cache_miss();
                None
            }
            Err(e) => {
                ProfileMetrics::cache_error("get");
                warn!("Cache read failed for '{}', falling back to database: {}", key, e);
                None
            }
        }
    }

    async fn populate(&self, key: &str, projection: &ProfileResponse) {
        if let Err(e) = self.cache.set(key, projection, self.ttl).await {
            ProfileMetrics::cache_error("set");
            warn!("Failed to cache profile under '{}': {}", key, e);
        }
    }

    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            ProfileMetrics::cache_error("delete");
            warn!("Failed to invalidate cache entry '{}': {}", key, e);
        }
    }

    async fn load_or_insert(&self, id: &ProfileId) -> BehemothResult<Profile> {
        if let Some(profile) = self.repository.find_by_id(id).await? {
            return Ok(profile);
        }

        let profile = Profile::empty(id.clone());
        match self.repository.insert(&profile).await {
            Ok(()) => {
                ProfileMetrics::profile_created();
                info!("Profile created: {}", id);
                Ok(profile)
            }
            Err(BehemothError::Conflict(_)) => {
                // Another request created it between our read and insert.
                debug!("Profile {} created concurrently, re-reading", id);
                self.repository.find_by_id(id).await?.ok_or_else(|| {
                    BehemothError::internal(format!("Profile {} missing after insert conflict", id))
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn load_existing(&self, id: &ProfileId) -> BehemothResult<Profile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BehemothError::not_found("Profile", id))
    }
}

#[async_trait]
impl ProfileService for ProfileStore {
    async fn get_or_create(&self, id: &ProfileId) -> BehemothResult<ProfileResponse> {
        debug!("Getting profile: {}", id);

        let key = self.cache_key(id);
        if let Some(cached) = self.read_cached(&key, id).await {
            return Ok(cached);
        }

        let projection = ProfileResponse::from(self.load_or_insert(id).await?);
        self.populate(&key, &projection).await;

        Ok(projection)
    }

    async fn update(&self, id: &ProfileId, request: UpdateProfileRequest) -> BehemothResult<Profile> {
        debug!("Updating profile: {}", id);

        request.validate_details()?;

        let mut profile = self.load_existing(id).await?;
        profile.apply_details(request.username, request.bio);
        self.repository.update(&profile).await?;

        self.invalidate(&self.cache_key(id)).await;

        ProfileMetrics::profile_updated("details");
        info!("Profile updated: {}", id);
        Ok(profile)
    }

    async fn update_avatar(&self, id: &ProfileId, avatar_url: String) -> BehemothResult<Profile> {
        debug!("Updating avatar of profile: {}", id);

        let mut profile = self.load_existing(id).await?;
        profile.set_avatar_url(avatar_url);
        self.repository.update(&profile).await?;

        self.invalidate(&self.cache_key(id)).await;

        ProfileMetrics::profile_updated("avatar");
        info!("Profile avatar updated: {}", id);
        Ok(profile)
    }
}
