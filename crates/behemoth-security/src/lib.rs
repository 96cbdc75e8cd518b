//! # Behemoth Security
//!
//! Resolves the caller's identity from `Authorization: Bearer` JWTs.

pub mod jwt;

pub use jwt::*;
