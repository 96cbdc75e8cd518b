//! Data Transfer Objects for the service layer.

mod profile_dto;

pub use profile_dto::*;
