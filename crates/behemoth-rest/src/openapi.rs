//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse, ReadinessResponse};
use behemoth_core::{ErrorResponse, FieldError};
use behemoth_service::{ProfileResponse, UpdateProfileRequest, UploadImageResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Behemoth profile API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Behemoth Profile API",
        version = "1.0.0",
        description = "Profile of the authenticated caller: details and avatar"
    ),
    paths(
        crate::controllers::profile_controller::get_my_profile,
        crate::controllers::profile_controller::update_my_profile,
        crate::controllers::profile_controller::upload_avatar,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            ProfileResponse,
            UpdateProfileRequest,
            UploadImageResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "profiles", description = "Caller profile endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Bearer token whose subject is the profile id"))
                        .build(),
                ),
            );
        }
    }
}
