//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `profile_service.rs`).

pub mod avatar_service_impl;
pub mod profile_store;

pub use avatar_service_impl::AvatarServiceImpl;
pub use profile_store::{ProfileStore, ProfileStoreParameters};
