//! Cache key generators for consistent key naming.

use behemoth_core::ProfileId;

/// Key segment naming the profile entity.
const PROFILE_SEGMENT: &str = "Profile:";

/// Generate the cache key for a profile.
///
/// The same prefix must be used by every instance sharing the cache.
#[must_use]
pub fn profile(prefix: &str, id: &ProfileId) -> String {
    format!("{}{}{}", prefix, PROFILE_SEGMENT, id)
}
