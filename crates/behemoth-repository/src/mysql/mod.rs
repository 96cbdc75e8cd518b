//! MySQL repository implementations.

mod profile_repository;

pub use profile_repository::*;
