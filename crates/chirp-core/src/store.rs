//! Storage capabilities the services depend on. Each storage technology
//! provides one adapter implementing these traits; services only ever see
//! `Arc<dyn ...>` handles.

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;

use chirp_types::models::{Comment, CommentSummary, Post, PostSummary, RefreshToken, User};

/// A write hit a uniqueness constraint. Adapters return it inside the
/// `anyhow::Error` so services can tell a lost race from a real failure.
#[derive(Debug, Error)]
#[error("duplicate record: {0}")]
pub struct Duplicate(pub String);

pub fn is_duplicate(err: &anyhow::Error) -> bool {
    err.is::<Duplicate>()
}

/// Users and their refresh tokens.
pub trait CredentialStore: Send + Sync {
    /// Inserts a user and returns the new id. A taken email or username
    /// fails with [`Duplicate`].
    fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i64>;

    fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Any user whose email OR username matches.
    fn find_user_by_email_or_username(&self, email: &str, username: &str)
    -> Result<Option<User>>;

    /// Replaces username, email and password hash of an existing user.
    fn update_user(&self, user: &User) -> Result<()>;

    /// A refresh token for `user_id` whose expiry is at or after `now`.
    fn find_live_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>>;

    fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>>;

    fn store_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Removes the record with this value. Absent tokens are not an error.
    fn delete_refresh_token(&self, token: &str) -> Result<()>;
}

/// Posts. Every read skips soft-deleted rows.
pub trait PostStore: Send + Sync {
    fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<i64>;

    fn get_post(&self, id: i64) -> Result<Option<Post>>;

    fn get_post_summary(&self, id: i64) -> Result<Option<PostSummary>>;

    /// Newest first. `author` restricts the listing to one user's posts.
    fn list_posts(&self, author: Option<i64>, limit: i64, offset: i64) -> Result<Vec<PostSummary>>;

    fn count_posts(&self, author: Option<i64>) -> Result<i64>;

    fn update_post(&self, id: i64, title: &str, content: &str) -> Result<()>;

    /// Soft delete.
    fn delete_post(&self, id: i64) -> Result<()>;
}

/// Comments. Every read skips soft-deleted rows.
pub trait CommentStore: Send + Sync {
    fn create_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<i64>;

    fn get_comment(&self, id: i64) -> Result<Option<Comment>>;

    fn get_comment_summary(&self, id: i64) -> Result<Option<CommentSummary>>;

    /// Newest first.
    fn list_comments(&self, post_id: i64, limit: i64, offset: i64) -> Result<Vec<CommentSummary>>;

    fn count_comments(&self, post_id: i64) -> Result<i64>;

    fn update_comment(&self, id: i64, content: &str) -> Result<()>;

    /// Soft delete.
    fn delete_comment(&self, id: i64) -> Result<()>;
}

/// What a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post(i64),
    Comment(i64),
}

impl LikeTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            LikeTarget::Post(_) => "post",
            LikeTarget::Comment(_) => "comment",
        }
    }
}

/// Likes are hard-deleted; at most one per (target, user).
pub trait LikeStore: Send + Sync {
    fn is_liked(&self, target: LikeTarget, user_id: i64) -> Result<bool>;

    /// Fails with [`Duplicate`] when the user already likes the target.
    fn like(&self, target: LikeTarget, user_id: i64) -> Result<()>;

    fn unlike(&self, target: LikeTarget, user_id: i64) -> Result<()>;

    fn count_likes(&self, target: LikeTarget) -> Result<i64>;
}
