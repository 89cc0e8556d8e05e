use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Storage and display format for timestamps (UTC, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never plaintext.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opaque long-lived credential exchanged for new access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Compared at whole seconds, the precision expiries are stored with, so
    /// this agrees with the store's live-token lookup.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now.trunc_subsecs(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post joined with its author's username and engagement counters.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub username: String,
    pub likes_count: i64,
    pub comments_count: i64,
}

/// A comment joined with its author's username and like counter.
#[derive(Debug, Clone)]
pub struct CommentSummary {
    pub comment: Comment,
    pub username: String,
    pub likes_count: i64,
}
