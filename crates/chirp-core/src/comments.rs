use std::sync::Arc;

use tracing::info;

use chirp_types::api::{CommentRequest, CommentResponse, CommentsResponse};
use chirp_types::models::CommentSummary;

use crate::error::{ServiceError, ServiceResult};
use crate::ownership::{Mutation, authorize};
use crate::pagination::PageRequest;
use crate::store::{CommentStore, PostStore};
use crate::{format_timestamp, validation};

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { comments, posts }
    }

    pub fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        req: &CommentRequest,
    ) -> ServiceResult<i64> {
        validation::require("content", &req.content)?;

        if self.posts.get_post(post_id)?.is_none() {
            return Err(ServiceError::not_found("post not found"));
        }

        let id = self.comments.create_comment(post_id, user_id, &req.content)?;
        info!("User {} commented {} on post {}", user_id, id, post_id);
        Ok(id)
    }

    pub fn get_comment(&self, id: i64) -> ServiceResult<CommentResponse> {
        self.comments
            .get_comment_summary(id)?
            .map(to_response)
            .ok_or_else(|| ServiceError::not_found("comment not found"))
    }

    pub fn list_comments(&self, post_id: i64, page: PageRequest) -> ServiceResult<CommentsResponse> {
        let rows = self
            .comments
            .list_comments(post_id, page.limit(), page.offset())?;
        let total_count = self.comments.count_comments(post_id)?;

        Ok(CommentsResponse {
            comments: rows.into_iter().map(to_response).collect(),
            total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages(total_count),
        })
    }

    pub fn update_comment(
        &self,
        user_id: i64,
        comment_id: i64,
        req: &CommentRequest,
    ) -> ServiceResult<()> {
        validation::require("content", &req.content)?;
        authorize(self.comments.get_comment(comment_id)?, user_id, Mutation::Update)?;
        self.comments.update_comment(comment_id, &req.content)?;
        Ok(())
    }

    pub fn delete_comment(&self, user_id: i64, comment_id: i64) -> ServiceResult<()> {
        authorize(self.comments.get_comment(comment_id)?, user_id, Mutation::Delete)?;
        self.comments.delete_comment(comment_id)?;
        Ok(())
    }
}

fn to_response(row: CommentSummary) -> CommentResponse {
    CommentResponse {
        id: row.comment.id,
        post_id: row.comment.post_id,
        user_id: row.comment.user_id,
        username: row.username,
        content: row.comment.content,
        likes_count: row.likes_count,
        created_at: format_timestamp(row.comment.created_at),
        updated_at: format_timestamp(row.comment.updated_at),
    }
}
