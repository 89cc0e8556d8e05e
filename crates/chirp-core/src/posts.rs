use std::sync::Arc;

use tracing::info;

use chirp_types::api::{PostRequest, PostResponse, PostsResponse};
use chirp_types::models::PostSummary;

use crate::error::{ServiceError, ServiceResult};
use crate::ownership::{Mutation, authorize};
use crate::pagination::PageRequest;
use crate::store::PostStore;
use crate::{format_timestamp, validation};

pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub fn create_post(&self, user_id: i64, req: &PostRequest) -> ServiceResult<i64> {
        validate(req)?;
        let id = self.store.create_post(user_id, &req.title, &req.content)?;
        info!("User {} created post {}", user_id, id);
        Ok(id)
    }

    pub fn get_post(&self, id: i64) -> ServiceResult<PostResponse> {
        self.store
            .get_post_summary(id)?
            .map(to_response)
            .ok_or_else(|| ServiceError::not_found("post not found"))
    }

    /// `author` narrows both the page and the total to one user's posts.
    pub fn list_posts(&self, author: Option<i64>, page: PageRequest) -> ServiceResult<PostsResponse> {
        let rows = self.store.list_posts(author, page.limit(), page.offset())?;
        let total_count = self.store.count_posts(author)?;

        Ok(PostsResponse {
            posts: rows.into_iter().map(to_response).collect(),
            total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages(total_count),
        })
    }

    pub fn update_post(&self, user_id: i64, post_id: i64, req: &PostRequest) -> ServiceResult<()> {
        validate(req)?;
        authorize(self.store.get_post(post_id)?, user_id, Mutation::Update)?;
        self.store.update_post(post_id, &req.title, &req.content)?;
        Ok(())
    }

    pub fn delete_post(&self, user_id: i64, post_id: i64) -> ServiceResult<()> {
        authorize(self.store.get_post(post_id)?, user_id, Mutation::Delete)?;
        self.store.delete_post(post_id)?;
        info!("User {} deleted post {}", user_id, post_id);
        Ok(())
    }
}

fn validate(req: &PostRequest) -> ServiceResult<()> {
    validation::require("title", &req.title)?;
    validation::max_chars("title", &req.title, validation::MAX_TITLE_LEN)?;
    validation::require("content", &req.content)?;
    Ok(())
}

fn to_response(row: PostSummary) -> PostResponse {
    PostResponse {
        id: row.post.id,
        user_id: row.post.user_id,
        username: row.username,
        title: row.post.title,
        content: row.post.content,
        likes_count: row.likes_count,
        comments_count: row.comments_count,
        created_at: format_timestamp(row.post.created_at),
        updated_at: format_timestamp(row.post.updated_at),
    }
}
