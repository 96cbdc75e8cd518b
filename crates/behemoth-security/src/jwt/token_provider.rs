//! JWT token provider for validating and issuing tokens.

use super::Claims;
use behemoth_config::SecurityConfig;
use behemoth_core::{BehemothError, BehemothResult};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.jwt_audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation.validate_exp = true;
        validation.validate_nbf = true;

        if config.local_auth_simulator {
            warn!("Local auth simulator enabled: bearer token signatures are NOT verified");
        }

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Returns true when tokens are accepted without signature checks.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.config.local_auth_simulator
    }

    /// Resolves the claims of a bearer token according to the configured mode.
    pub fn authenticate(&self, token: &str) -> BehemothResult<Claims> {
        if self.is_simulated() {
            self.decode_without_validation(token)
        } else {
            self.validate_token(token)
        }
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> BehemothResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => BehemothError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        BehemothError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        BehemothError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        BehemothError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => BehemothError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes a token without validation, reading its claims only.
    pub fn decode_without_validation(&self, token: &str) -> BehemothResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| BehemothError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Issues a signed token for `subject` valid for `ttl`.
    ///
    /// Used by local tooling and tests; production tokens come from the
    /// identity provider.
    pub fn issue_token(&self, subject: &str, ttl: Duration) -> BehemothResult<String> {
        let mut claims = Claims::for_subject(subject, Utc::now() + ttl);
        claims.iss.clone_from(&self.config.jwt_issuer);
        claims.aud = self
            .config
            .jwt_audience
            .clone()
            .map(serde_json::Value::String);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BehemothError::Internal(format!("Failed to issue token: {}", e)))?;

        debug!("Issued token for subject {}", subject);
        Ok(token)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .field("simulated", &self.config.local_auth_simulator)
            .finish_non_exhaustive()
    }
}
