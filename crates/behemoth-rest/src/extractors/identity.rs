//! Caller identity extractor.

use crate::middleware::TokenRejected;
use crate::responses::AppError;
use behemoth_core::{BehemothError, ProfileId};
use behemoth_security::Claims;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Profile id of the authenticated caller.
///
/// Reads the claims stored by [`auth_middleware`](crate::middleware::auth_middleware)
/// and resolves them to a [`ProfileId`]. Requests without a usable identity are
/// rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub ProfileId);

impl std::ops::Deref for CurrentProfile {
    type Target = ProfileId;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(rejected) = parts.extensions.get::<TokenRejected>() {
            return Err(AppError(if rejected.expired {
                BehemothError::TokenExpired
            } else {
                BehemothError::InvalidToken("Bearer token was rejected".to_string())
            }));
        }

        let claims = parts.extensions.get::<Claims>().ok_or_else(|| {
            AppError(BehemothError::unauthorized("Missing bearer token"))
        })?;

        Ok(CurrentProfile(claims.profile_id()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use chrono::{Duration, Utc};

    fn parts() -> Parts {
        Request::builder().uri("/profiles/me").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_resolves_subject() {
        let mut parts = parts();
        parts
            .extensions
            .insert(Claims::for_subject("u1", Utc::now() + Duration::hours(1)));

        let CurrentProfile(id) = CurrentProfile::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.as_str(), "u1");
    }

    #[tokio::test]
    async fn test_missing_claims_is_unauthorized() {
        let mut parts = parts();
        let err = CurrentProfile::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_reported() {
        let mut parts = parts();
        parts.extensions.insert(TokenRejected { expired: true });

        let err = CurrentProfile::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err.0, BehemothError::TokenExpired));
    }
}
