//! Dependency initialization at start-up.
//!
//! The database and the blob container must come up before the server
//! accepts requests; each is retried with a fixed delay. The cache is
//! optional: when it does not answer the service starts degraded and reads
//! go to the database.

use behemoth_config::{AppConfig, StartupConfig};
use behemoth_core::BehemothResult;
use behemoth_repository::{DatabasePool, DatabasePoolInterface};
use behemoth_service::{create_pool, BlobStore, CacheInterface, FsBlobStore, RedisCacheService};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Linear retry policy for start-up dependencies.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, at least one.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy from the `startup` configuration section.
    pub fn from_config(config: &StartupConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.delay(),
        }
    }

    /// Runs `f` until it succeeds or the attempts are exhausted.
    ///
    /// Returns the last error when every attempt failed.
    pub async fn execute<F, Fut, T>(&self, dependency: &str, mut f: F) -> BehemothResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BehemothResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match f().await {
                Ok(value) => {
                    info!(dependency, attempt, "Dependency is up");
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        dependency,
                        attempt,
                        max_attempts,
                        "Dependency not ready: {}; retrying in {:?}",
                        e,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(dependency, attempt, "Giving up on dependency: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

/// Clients of the backing services, ready for use.
pub struct Infrastructure {
    pub database: Arc<DatabasePool>,
    pub cache: Arc<RedisCacheService>,
    pub blobs: Arc<FsBlobStore>,
}

impl Infrastructure {
    /// Brings up the database, cache and blob store.
    pub async fn initialize(config: &AppConfig) -> BehemothResult<Self> {
        let policy = RetryPolicy::from_config(&config.startup);

        let database = policy
            .execute("database", || DatabasePool::new(&config.database))
            .await?;
        if config.database.run_migrations {
            database.run_migrations().await?;
        }

        let cache = connect_cache(config).await?;

        let blobs = FsBlobStore::new(&config.storage);
        policy
            .execute("blob_store", || blobs.ensure_container())
            .await?;

        Ok(Self {
            database: Arc::new(database),
            cache: Arc::new(cache),
            blobs: Arc::new(blobs),
        })
    }

    /// Releases pooled connections.
    pub async fn shutdown(&self) {
        self.database.close().await;
        info!("Infrastructure shut down");
    }
}

/// Creates the Redis pool and checks it once; a cache that does not answer is
/// kept and reported as degraded by the readiness probe.
async fn connect_cache(config: &AppConfig) -> BehemothResult<RedisCacheService> {
    if !config.redis.enabled {
        info!("Redis disabled, profile cache is bypassed");
        return Ok(RedisCacheService::disabled());
    }

    let pool = create_pool(&config.redis)?;
    let cache = RedisCacheService::new(Arc::new(pool));

    match cache.ping().await {
        Ok(()) => info!("Redis cache is up"),
        Err(e) => warn!("Redis cache unavailable, continuing degraded: {}", e),
    }

    Ok(cache)
}
