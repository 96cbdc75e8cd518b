//! # Behemoth Service
//!
//! Cache-aside profile store and its collaborators: the Redis cache and the
//! avatar blob store.

pub mod avatar_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;
pub mod profile_service;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use avatar_service::*;
pub use cache::*;
pub use dto::*;
pub use self::metrics::{register_metrics, ProfileMetrics};
pub use profile_service::*;
pub use r#impl::{AvatarServiceImpl, ProfileStore, ProfileStoreParameters};
pub use storage::*;
