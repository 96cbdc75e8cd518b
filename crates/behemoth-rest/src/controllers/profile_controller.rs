//! Profile controller for the caller's own profile.

use crate::{
    extractors::{CurrentProfile, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Router,
};
use axum_extra::{headers::ContentType, TypedHeader};
use behemoth_core::ErrorResponse;
use behemoth_service::{ProfileResponse, UpdateProfileRequest, UploadImageResponse};
use tracing::debug;

/// Creates the profile router, mounted under `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile).patch(update_my_profile))
        .route("/avatar", post(upload_avatar))
}

/// Get the caller's profile, creating an empty one on first access.
#[utoipa::path(
    get,
    path = "/profiles/me",
    tag = "profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    CurrentProfile(id): CurrentProfile,
) -> ApiResult<ProfileResponse> {
    debug!(profile_id = %id, "GET /profiles/me");
    ok(state.profile_service.get_or_create(&id).await?)
}

/// Replace the caller's username and bio.
#[utoipa::path(
    patch,
    path = "/profiles/me",
    tag = "profiles",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid username or bio", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Profile was never created", body = ErrorResponse)
    )
)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    CurrentProfile(id): CurrentProfile,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ProfileResponse> {
    debug!(profile_id = %id, "PATCH /profiles/me");
    let profile = state.profile_service.update(&id, request).await?;
    ok(ProfileResponse::from(profile))
}

/// Upload an avatar image for the caller.
///
/// The raw request body is the image; its `Content-Type` must be an image type.
#[utoipa::path(
    post,
    path = "/profiles/avatar",
    tag = "profiles",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, description = "Image bytes", content_type = "image/png"),
    responses(
        (status = 200, description = "Avatar stored", body = UploadImageResponse),
        (status = 400, description = "Empty body or non-image content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Profile was never created", body = ErrorResponse),
        (status = 413, description = "Image exceeds the body size limit")
    )
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    CurrentProfile(id): CurrentProfile,
    content_type: Option<TypedHeader<ContentType>>,
    body: Bytes,
) -> ApiResult<UploadImageResponse> {
    let content_type = content_type.map(|TypedHeader(ct)| ct.to_string());
    debug!(profile_id = %id, content_type = ?content_type, size = body.len(), "POST /profiles/avatar");

    let response = state
        .avatar_service
        .upload_avatar(&id, content_type.as_deref(), &body)
        .await?;
    ok(response)
}
