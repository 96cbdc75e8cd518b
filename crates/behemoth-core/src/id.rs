//! Typed ID wrappers for domain entities.

use crate::{BehemothError, BehemothResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Longest identifier accepted, matching the `profiles.id` column width.
pub const MAX_PROFILE_ID_LEN: usize = 128;

/// Opaque, immutable identifier of a profile.
///
/// The value comes from the caller's identity (token subject) and is never
/// generated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Parses a profile ID, rejecting blank, padded or oversized values.
    ///
    /// Ids are compared byte for byte, so `" u1"` is refused rather than
    /// folded into `"u1"`.
    pub fn parse(value: impl Into<String>) -> BehemothResult<Self> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(BehemothError::validation("Profile id must not be empty"));
        }
        if value.trim() != value {
            return Err(BehemothError::validation(
                "Profile id must not have surrounding whitespace",
            ));
        }
        if value.len() > MAX_PROFILE_ID_LEN {
            return Err(BehemothError::validation(format!(
                "Profile id must be at most {} characters",
                MAX_PROFILE_ID_LEN
            )));
        }

        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
