//! Application state for Axum handlers.

use behemoth_core::HealthCheck;
use behemoth_security::TokenProvider;
use behemoth_service::{AvatarService, ProfileService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<dyn ProfileService>,
    pub avatar_service: Arc<dyn AvatarService>,
    pub token_provider: Arc<TokenProvider>,
    /// Dependencies probed by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        profile_service: Arc<dyn ProfileService>,
        avatar_service: Arc<dyn AvatarService>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            profile_service,
            avatar_service,
            token_provider,
            health_checks: Vec::new(),
        }
    }

    /// Adds a dependency to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
