//! Custom Axum extractors.

pub mod identity;
pub mod validated;

pub use identity::*;
pub use validated::*;
