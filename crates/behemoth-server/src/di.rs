//! Dependency injection module using Shaku.
//!
//! `ProfileModule` holds one instance of each profile component. Clients are
//! created by [`Infrastructure`] and handed to the module as parameters, so
//! the components share the pools the readiness checks use.

use crate::infra::Infrastructure;
use behemoth_config::AppConfig;
use behemoth_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MySqlProfileRepository,
};
use behemoth_rest::AppState;
use behemoth_security::TokenProvider;
use behemoth_service::{
    AvatarService, AvatarServiceImpl, FsBlobStore, ProfileService, ProfileStore,
    ProfileStoreParameters, RedisCacheService,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Single-process deployment: MySQL repository, Redis cache, filesystem blobs.
module! {
    pub ProfileModule {
        components = [
            DatabasePool,
            MySqlProfileRepository,
            RedisCacheService,
            FsBlobStore,
            ProfileStore,
            AvatarServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the profile module over the initialized infrastructure.
pub fn build_profile_module(infra: &Infrastructure, config: &AppConfig) -> Arc<ProfileModule> {
    let module = ProfileModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: infra.database.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(infra.cache.component_parameters())
        .with_component_parameters::<FsBlobStore>(infra.blobs.component_parameters())
        .with_component_parameters::<ProfileStore>(ProfileStoreParameters::from_config(
            &config.cache,
        ))
        .build();

    info!(
        key_prefix = %config.cache.key_prefix,
        ttl = ?config.cache.profile_ttl(),
        "Profile module built"
    );

    Arc::new(module)
}

/// Builds the REST application state from the module.
///
/// Readiness probes the database, the cache and the blob store.
pub fn build_app_state(
    module: &ProfileModule,
    infra: &Infrastructure,
    config: &AppConfig,
) -> AppState {
    let profiles: Arc<dyn ProfileService> = module.resolve();
    let avatars: Arc<dyn AvatarService> = module.resolve();
    let token_provider = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));

    AppState::new(profiles, avatars, token_provider)
        .with_health_check(infra.database.clone())
        .with_health_check(infra.cache.clone())
        .with_health_check(infra.blobs.clone())
}
