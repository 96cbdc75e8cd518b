//! Fully wired application over in-memory dependencies.

use super::fakes::{MemoryBlobStore, MemoryCache, MemoryRepository};
use super::client::TestClient;
use behemoth_config::{CacheConfig, SecurityConfig, ServerConfig};
use behemoth_rest::{create_router, AppState};
use behemoth_security::TokenProvider;
use behemoth_service::{AvatarServiceImpl, ProfileService, ProfileStore};
use std::path::PathBuf;
use std::sync::Arc;

pub const TEST_SECRET: &str = "behemoth-test-secret";

pub struct TestApp {
    pub client: TestClient,
    pub repository: Arc<MemoryRepository>,
    pub cache: Arc<MemoryCache>,
    pub blobs: Arc<MemoryBlobStore>,
    pub tokens: Arc<TokenProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(ServerConfig::default(), None)
    }

    pub fn with_server_config(server_config: ServerConfig) -> Self {
        Self::build(server_config, None)
    }

    pub fn with_blob_root(root: PathBuf) -> Self {
        Self::build(ServerConfig::default(), Some(root))
    }

    fn build(server_config: ServerConfig, blob_root: Option<PathBuf>) -> Self {
        let repository = Arc::new(MemoryRepository::default());
        let cache = Arc::new(MemoryCache::default());
        let blobs = Arc::new(MemoryBlobStore::default());

        let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            ..SecurityConfig::default()
        })));

        let profiles: Arc<dyn ProfileService> = Arc::new(ProfileStore::new(
            repository.clone(),
            cache.clone(),
            &CacheConfig::default(),
        ));
        let avatars = Arc::new(AvatarServiceImpl::new(
            profiles.clone(),
            repository.clone(),
            blobs.clone(),
        ));

        let state = AppState::new(profiles, avatars, tokens.clone())
            .with_health_check(repository.clone())
            .with_health_check(cache.clone());

        let router = create_router(state, &server_config, blob_root);

        Self {
            client: TestClient::new(router),
            repository,
            cache,
            blobs,
            tokens,
        }
    }

    /// Client authenticated as `subject`.
    pub fn as_user(&self, subject: &str) -> TestClient {
        let token = self
            .tokens
            .issue_token(subject, chrono::Duration::hours(1))
            .unwrap();
        self.client.with_token(token)
    }
}
