//! JWT claims structure.

use behemoth_core::{BehemothError, BehemothResult, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims read from a caller's bearer token.
///
/// Only the identity claims are modelled; anything else in the token is
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (stable caller identifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Object ID, issued by identity providers that keep `sub` pairwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,

    /// Caller's email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Caller's preferred username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience, either a string or a list of strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,

    /// Issued at timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Creates claims for `subject` expiring at `expires_at`.
    #[must_use]
    pub fn for_subject(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: Some(subject.into()),
            iat: Some(Utc::now().timestamp()),
            exp: Some(expires_at.timestamp()),
            ..Self::default()
        }
    }

    /// Returns the profile ID of the caller: `sub`, falling back to `oid`.
    pub fn profile_id(&self) -> BehemothResult<ProfileId> {
        [self.sub.as_deref(), self.oid.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| BehemothError::unauthorized("Token carries no subject"))
            .and_then(|value| {
                ProfileId::parse(value).map_err(|_| BehemothError::unauthorized("Token subject is not usable"))
            })
    }

    /// Checks if the token is expired. Tokens without `exp` never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now().timestamp() > exp)
    }
}
