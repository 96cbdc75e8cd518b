//! Main application router.

use crate::{
    controllers::{health_controller, profile_controller},
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use behemoth_config::ServerConfig;
use std::path::PathBuf;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Mount point of the blob directory when avatars are served locally.
pub const BLOBS_PATH: &str = "/blobs";

/// Creates the main application router.
///
/// When `blob_root` is set, its contents are served read-only under
/// [`BLOBS_PATH`] so avatar URLs produced by the filesystem store resolve.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    blob_root: Option<PathBuf>,
) -> Router {
    let cors = create_cors_layer(server_config);
    let auth_state = AuthMiddlewareState::new(state.token_provider.clone());

    let profiles = profile_controller::router()
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router())
        .nest("/profiles", profiles)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    let router = match blob_root {
        Some(root) => router.nest_service(BLOBS_PATH, ServeDir::new(root)),
        None => router,
    };

    let router = router
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with profile endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
