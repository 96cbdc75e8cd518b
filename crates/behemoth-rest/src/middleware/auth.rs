//! Authentication middleware.

use behemoth_core::BehemothError;
use behemoth_security::TokenProvider;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<TokenProvider>,
}

impl AuthMiddlewareState {
    /// Creates the middleware state.
    pub fn new(token_provider: Arc<TokenProvider>) -> Self {
        Self { token_provider }
    }
}

/// Marker left in the request extensions when a bearer token was presented
/// but could not be accepted.
#[derive(Debug, Clone, Copy)]
pub struct TokenRejected {
    pub expired: bool,
}

/// Authentication middleware that validates bearer tokens.
///
/// Accepted tokens put their claims into the request extensions; rejected
/// ones leave a [`TokenRejected`] marker. Handlers that need an identity
/// decide what to answer through the `CurrentProfile` extractor.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .map(str::to_string);

    if let Some(token) = token {
        match state.token_provider.authenticate(&token) {
            Ok(claims) => {
                debug!(subject = ?claims.sub, "Authenticated caller");
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
                request.extensions_mut().insert(TokenRejected {
                    expired: matches!(e, BehemothError::TokenExpired),
                });
            }
        }
    }

    next.run(request).await
}
