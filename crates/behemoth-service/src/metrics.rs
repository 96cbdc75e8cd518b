//! Prometheus metrics for the profile store.

use metrics::{counter, describe_counter};

/// Metric names for the profile store.
pub mod names {
    /// Profile reads answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "profile_cache_hits_total";
    /// Profile reads that fell through to the database.
    pub const CACHE_MISSES_TOTAL: &str = "profile_cache_misses_total";
    /// Cache operations that failed and were absorbed.
    pub const CACHE_ERRORS_TOTAL: &str = "profile_cache_errors_total";
    /// Empty profiles created on first access.
    pub const PROFILES_CREATED_TOTAL: &str = "profiles_created_total";
    /// Profile writes, labelled by the field set they touched.
    pub const PROFILE_UPDATES_TOTAL: &str = "profile_updates_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Profile reads answered from the cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Profile reads served by the database");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Cache operations that failed and were ignored"
    );
    describe_counter!(names::PROFILES_CREATED_TOTAL, "Profiles created on first access");
    describe_counter!(names::PROFILE_UPDATES_TOTAL, "Profile updates by field set");
}

/// Profile store metrics recorder.
#[derive(Clone)]
pub struct ProfileMetrics;

impl ProfileMetrics {
    /// Record a cache hit.
    pub fn cache_hit() {
        counter!(names::CACHE_HITS_TOTAL).increment(1);
    }

    /// Record a cache miss.
    pub fn cache_miss() {
        counter!(names::CACHE_MISSES_TOTAL).increment(1);
    }

    /// Record an absorbed cache failure for `op` (get, set, delete).
    pub fn cache_error(op: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "op" => op).increment(1);
    }

    /// Record a profile creation.
    pub fn profile_created() {
        counter!(names::PROFILES_CREATED_TOTAL).increment(1);
    }

    /// Record a profile update touching `field_set` (details, avatar).
    pub fn profile_updated(field_set: &'static str) {
        counter!(names::PROFILE_UPDATES_TOTAL, "field_set" => field_set).increment(1);
    }
}
