//! Domain entities.

mod profile;

pub use profile::*;
