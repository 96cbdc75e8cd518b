//! MySQL profile repository implementation.

use crate::{traits::ProfileRepository, DatabasePoolInterface};
use async_trait::async_trait;
use behemoth_core::{BehemothError, BehemothResult, Profile, ProfileId};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL profile repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProfileRepository)]
pub struct MySqlProfileRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProfileRepository {
    /// Creates a new MySQL profile repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a profile.
#[derive(Debug, FromRow)]
struct ProfileRow {
    id: String,
    username: String,
    bio: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = BehemothError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let id = ProfileId::parse(row.id)
            .map_err(|e| BehemothError::Internal(format!("Invalid profile id in database: {}", e)))?;

        Ok(Profile {
            id,
            username: row.username,
            bio: row.bio,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> BehemothResult<Option<Profile>> {
        debug!("Finding profile by id: {}", id);

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, username, bio, avatar_url, created_at, updated_at
            FROM profiles
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn insert(&self, profile: &Profile) -> BehemothResult<()> {
        debug!("Inserting profile: {}", profile.id);

        // Duplicate keys surface as BehemothError::Conflict
        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, bio, avatar_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.username)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> BehemothResult<()> {
        debug!("Updating profile: {}", profile.id);

        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET username = ?, bio = ?, avatar_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.username)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at)
        .bind(profile.id.as_str())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(BehemothError::not_found("Profile", &profile.id));
        }

        Ok(())
    }

    async fn health_check(&self) -> BehemothResult<()> {
        self.pool.health_check().await
    }
}
