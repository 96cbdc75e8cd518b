//! # Behemoth Core
//!
//! Core types, traits, and error definitions for the Behemoth profile service.
//! Every other crate in the workspace builds on the error taxonomy and the
//! `Profile` entity defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku so component traits share one `Interface` bound
pub use shaku::Interface;
