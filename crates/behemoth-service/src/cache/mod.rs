//! Caching infrastructure for the service layer.
//!
//! The cache only ever holds disposable copies of profile projections; the
//! database stays the system of record.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
#[cfg(test)]
pub use cache_interface::MockCacheInterface;
pub use redis_cache::{create_pool, RedisCacheService, RedisCacheServiceParameters};
