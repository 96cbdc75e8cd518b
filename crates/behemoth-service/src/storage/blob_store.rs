//! Blob store trait and content-type helpers.

use async_trait::async_trait;
use behemoth_core::{BehemothError, BehemothResult, Interface, ProfileId};

/// Write-only store for uploaded binary objects.
#[async_trait]
pub trait BlobStore: Interface + Send + Sync {
    /// Stores `bytes` under `name` and returns the public URL of the blob.
    async fn upload(&self, name: &str, content_type: &str, bytes: &[u8]) -> BehemothResult<String>;

    /// Creates the container if it does not exist yet.
    async fn ensure_container(&self) -> BehemothResult<()>;
}

/// Normalizes an image content type and returns `(mime, extension)`.
///
/// Parameters such as `; charset=...` are ignored. Anything outside the
/// `image/*` family is a validation failure.
pub fn image_extension(content_type: Option<&str>) -> BehemothResult<(String, String)> {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let subtype = mime
        .strip_prefix("image/")
        .ok_or_else(|| BehemothError::validation("Avatar must be an image (image/* content type)"))?;

    // "svg+xml" -> "svg"
    let base = subtype.split('+').next().unwrap_or_default();
    let extension: String = match base {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        other => other.chars().filter(char::is_ascii_alphanumeric).collect(),
    };

    if extension.is_empty() {
        return Err(BehemothError::validation("Unsupported image content type"));
    }

    Ok((mime, extension))
}

/// Builds the blob name `<id>-<unix-nanos>.<ext>`.
///
/// Characters outside `[A-Za-z0-9_-]` in the id are replaced with `_` so the
/// name stays a single path segment.
#[must_use]
pub fn avatar_blob_name(id: &ProfileId, unix_nanos: i64, extension: &str) -> String {
    let safe_id: String = id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}.{}", safe_id, unix_nanos, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension() {
        assert_eq!(
            image_extension(Some("image/png")).unwrap(),
            ("image/png".to_string(), "png".to_string())
        );
        assert_eq!(image_extension(Some("IMAGE/JPEG; q=1")).unwrap().1, "jpg");
        assert_eq!(image_extension(Some("image/svg+xml")).unwrap().1, "svg");
    }

    #[test]
    fn test_non_image_is_rejected() {
        for content_type in [None, Some(""), Some("text/plain"), Some("application/json"), Some("image/")] {
            let err = image_extension(content_type).unwrap_err();
            assert!(matches!(err, BehemothError::Validation { .. }), "{content_type:?}");
        }
    }

    #[test]
    fn test_avatar_blob_name() {
        let id = ProfileId::parse("u1").unwrap();
        assert_eq!(avatar_blob_name(&id, 42, "png"), "u1-42.png");

        let id = ProfileId::parse("auth0|abc/../x").unwrap();
        assert_eq!(avatar_blob_name(&id, 7, "jpg"), "auth0_abc____x-7.jpg");
    }
}
