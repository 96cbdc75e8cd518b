//! Profile entity.

use crate::ProfileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile entity owned by a single caller identity.
///
/// Field ownership is enforced through the mutators: [`apply_details`](Self::apply_details)
/// only touches `username`/`bio`, [`set_avatar_url`](Self::set_avatar_url) only touches
/// `avatar_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable identifier, immutable after creation.
    pub id: ProfileId,

    /// Display name; empty until the owner sets it.
    pub username: String,

    /// Optional free text.
    pub bio: Option<String>,

    /// Public URL of the uploaded avatar image.
    pub avatar_url: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates the empty profile persisted on first access.
    #[must_use]
    pub fn empty(id: ProfileId) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: String::new(),
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces username and bio. The avatar is left untouched.
    pub fn apply_details(&mut self, username: String, bio: Option<String>) {
        self.username = username;
        self.bio = bio;
        self.updated_at = Utc::now();
    }

    /// Replaces the avatar URL. Username and bio are left untouched.
    pub fn set_avatar_url(&mut self, avatar_url: String) {
        self.avatar_url = Some(avatar_url);
        self.updated_at = Utc::now();
    }
}
