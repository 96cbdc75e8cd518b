//! Blob storage for avatar images.

mod blob_store;
mod fs_blob_store;

pub use blob_store::*;
pub use fs_blob_store::{FsBlobStore, FsBlobStoreParameters};
