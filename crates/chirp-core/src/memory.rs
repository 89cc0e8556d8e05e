//! In-memory implementation of every store trait, for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};

use chirp_types::models::{Comment, CommentSummary, Post, PostSummary, RefreshToken, User};

use crate::store::{CommentStore, CredentialStore, Duplicate, LikeStore, LikeTarget, PostStore};

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    refresh_tokens: Vec<RefreshToken>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: HashMap<LikeTarget, Vec<i64>>,
    /// Each insert advances the clock so "newest first" is deterministic.
    tick: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000) + Duration::seconds(self.tick)
    }

    fn username(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn like_count(&self, target: LikeTarget) -> i64 {
        self.likes.get(&target).map(|v| v.len() as i64).unwrap_or(0)
    }

    fn post_summary(&self, post: &Post) -> PostSummary {
        PostSummary {
            post: post.clone(),
            username: self.username(post.user_id),
            likes_count: self.like_count(LikeTarget::Post(post.id)),
            comments_count: self
                .comments
                .iter()
                .filter(|c| c.post_id == post.id && c.deleted_at.is_none())
                .count() as i64,
        }
    }

    fn comment_summary(&self, comment: &Comment) -> CommentSummary {
        CommentSummary {
            comment: comment.clone(),
            username: self.username(comment.user_id),
            likes_count: self.like_count(LikeTarget::Comment(comment.id)),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail: Mutex<bool>,
    skip_lookups: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call return an error.
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// Duplicate pre-checks (`find_user_by_email_or_username`, `is_liked`)
    /// report nothing, as if a concurrent writer had not committed yet.
    pub fn skip_duplicate_lookups(&self) {
        *self.skip_lookups.lock().unwrap() = true;
    }

    fn lookups_skipped(&self) -> bool {
        *self.skip_lookups.lock().unwrap()
    }

    pub fn refresh_tokens_for(&self, user_id: i64) -> Vec<RefreshToken> {
        self.state
            .lock()
            .unwrap()
            .refresh_tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn insert_refresh_token(&self, user_id: i64, token: &str, expires_at: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        state.refresh_tokens.push(RefreshToken {
            id,
            user_id,
            token: token.to_string(),
            expires_at,
            created_at: now,
            updated_at: now,
        });
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        if *self.fail.lock().unwrap() {
            return Err(anyhow!("store unavailable"));
        }
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

impl CredentialStore for MemoryStore {
    fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        self.with_state(|s| {
            if s.users.iter().any(|u| u.email == email || u.username == username) {
                return Err(Duplicate(format!("user {} / {}", username, email)).into());
            }
            let id = s.next_id();
            let now = s.now();
            s.users.push(User {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password: password_hash.to_string(),
                created_at: now,
                updated_at: now,
            });
            Ok(id)
        })
    }

    fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_state(|s| Ok(s.users.iter().find(|u| u.id == id).cloned()))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_state(|s| Ok(s.users.iter().find(|u| u.email == email).cloned()))
    }

    fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>> {
        if self.lookups_skipped() {
            return Ok(None);
        }
        self.with_state(|s| {
            Ok(s.users
                .iter()
                .find(|u| u.email == email || u.username == username)
                .cloned())
        })
    }

    fn update_user(&self, user: &User) -> Result<()> {
        self.with_state(|s| {
            let now = s.now();
            if let Some(existing) = s.users.iter_mut().find(|u| u.id == user.id) {
                existing.username = user.username.clone();
                existing.email = user.email.clone();
                existing.password = user.password.clone();
                existing.updated_at = now;
            }
            Ok(())
        })
    }

    fn find_live_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>> {
        self.with_state(|s| {
            Ok(s.refresh_tokens
                .iter()
                .find(|t| t.user_id == user_id && !t.is_expired(now))
                .cloned())
        })
    }

    fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        self.with_state(|s| Ok(s.refresh_tokens.iter().find(|t| t.token == token).cloned()))
    }

    fn store_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.with_state(|s| {
            let id = s.next_id();
            let now = Utc::now();
            s.refresh_tokens.push(RefreshToken {
                id,
                user_id,
                token: token.to_string(),
                expires_at,
                created_at: now,
                updated_at: now,
            });
            Ok(())
        })
    }

    fn delete_refresh_token(&self, token: &str) -> Result<()> {
        self.with_state(|s| {
            s.refresh_tokens.retain(|t| t.token != token);
            Ok(())
        })
    }
}

impl PostStore for MemoryStore {
    fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<i64> {
        self.with_state(|s| {
            let id = s.next_id();
            let now = s.now();
            s.posts.push(Post {
                id,
                user_id,
                title: title.to_string(),
                content: content.to_string(),
                deleted_at: None,
                created_at: now,
                updated_at: now,
            });
            Ok(id)
        })
    }

    fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.with_state(|s| {
            Ok(s.posts
                .iter()
                .find(|p| p.id == id && p.deleted_at.is_none())
                .cloned())
        })
    }

    fn get_post_summary(&self, id: i64) -> Result<Option<PostSummary>> {
        self.with_state(|s| {
            Ok(s.posts
                .iter()
                .find(|p| p.id == id && p.deleted_at.is_none())
                .map(|p| s.post_summary(p)))
        })
    }

    fn list_posts(&self, author: Option<i64>, limit: i64, offset: i64) -> Result<Vec<PostSummary>> {
        self.with_state(|s| {
            Ok(s.posts
                .iter()
                .rev()
                .filter(|p| p.deleted_at.is_none() && author.is_none_or(|a| p.user_id == a))
                .skip(offset as usize)
                .take(limit as usize)
                .map(|p| s.post_summary(p))
                .collect())
        })
    }

    fn count_posts(&self, author: Option<i64>) -> Result<i64> {
        self.with_state(|s| {
            Ok(s.posts
                .iter()
                .filter(|p| p.deleted_at.is_none() && author.is_none_or(|a| p.user_id == a))
                .count() as i64)
        })
    }

    fn update_post(&self, id: i64, title: &str, content: &str) -> Result<()> {
        self.with_state(|s| {
            let now = s.now();
            if let Some(post) = s.posts.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) {
                post.title = title.to_string();
                post.content = content.to_string();
                post.updated_at = now;
            }
            Ok(())
        })
    }

    fn delete_post(&self, id: i64) -> Result<()> {
        self.with_state(|s| {
            let now = s.now();
            if let Some(post) = s.posts.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) {
                post.deleted_at = Some(now);
            }
            Ok(())
        })
    }
}

impl CommentStore for MemoryStore {
    fn create_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<i64> {
        self.with_state(|s| {
            let id = s.next_id();
            let now = s.now();
            s.comments.push(Comment {
                id,
                post_id,
                user_id,
                content: content.to_string(),
                deleted_at: None,
                created_at: now,
                updated_at: now,
            });
            Ok(id)
        })
    }

    fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        self.with_state(|s| {
            Ok(s.comments
                .iter()
                .find(|c| c.id == id && c.deleted_at.is_none())
                .cloned())
        })
    }

    fn get_comment_summary(&self, id: i64) -> Result<Option<CommentSummary>> {
        self.with_state(|s| {
            Ok(s.comments
                .iter()
                .find(|c| c.id == id && c.deleted_at.is_none())
                .map(|c| s.comment_summary(c)))
        })
    }

    fn list_comments(&self, post_id: i64, limit: i64, offset: i64) -> Result<Vec<CommentSummary>> {
        self.with_state(|s| {
            Ok(s.comments
                .iter()
                .rev()
                .filter(|c| c.post_id == post_id && c.deleted_at.is_none())
                .skip(offset as usize)
                .take(limit as usize)
                .map(|c| s.comment_summary(c))
                .collect())
        })
    }

    fn count_comments(&self, post_id: i64) -> Result<i64> {
        self.with_state(|s| {
            Ok(s.comments
                .iter()
                .filter(|c| c.post_id == post_id && c.deleted_at.is_none())
                .count() as i64)
        })
    }

    fn update_comment(&self, id: i64, content: &str) -> Result<()> {
        self.with_state(|s| {
            let now = s.now();
            if let Some(c) = s.comments.iter_mut().find(|c| c.id == id && c.deleted_at.is_none()) {
                c.content = content.to_string();
                c.updated_at = now;
            }
            Ok(())
        })
    }

    fn delete_comment(&self, id: i64) -> Result<()> {
        self.with_state(|s| {
            let now = s.now();
            if let Some(c) = s.comments.iter_mut().find(|c| c.id == id && c.deleted_at.is_none()) {
                c.deleted_at = Some(now);
            }
            Ok(())
        })
    }
}

impl LikeStore for MemoryStore {
    fn is_liked(&self, target: LikeTarget, user_id: i64) -> Result<bool> {
        if self.lookups_skipped() {
            return Ok(false);
        }
        self.with_state(|s| {
            Ok(s.likes
                .get(&target)
                .is_some_and(|users| users.contains(&user_id)))
        })
    }

    fn like(&self, target: LikeTarget, user_id: i64) -> Result<()> {
        self.with_state(|s| {
            let users = s.likes.entry(target).or_default();
            if users.contains(&user_id) {
                return Err(Duplicate(format!("{:?} by user {}", target, user_id)).into());
            }
            users.push(user_id);
            Ok(())
        })
    }

    fn unlike(&self, target: LikeTarget, user_id: i64) -> Result<()> {
        self.with_state(|s| {
            if let Some(users) = s.likes.get_mut(&target) {
                users.retain(|u| *u != user_id);
            }
            Ok(())
        })
    }

    fn count_likes(&self, target: LikeTarget) -> Result<i64> {
        self.with_state(|s| Ok(s.like_count(target)))
    }
}
