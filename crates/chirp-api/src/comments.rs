use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use chirp_types::api::{CommentRequest, IdResponse, MessageResponse};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::params::{PageQuery, parse_id};
use crate::blocking::run_blocking;
use crate::state::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = parse_id(&post_id)?;
    let Json(req) = body?;
    let id = run_blocking(move || state.comments.create_comment(user.id, post_id, &req)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = parse_id(&post_id)?;
    let page = query.to_page_request();
    let comments = run_blocking(move || state.comments.list_comments(post_id, page)).await?;
    Ok(Json(comments))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let comment = run_blocking(move || state.comments.get_comment(id)).await?;
    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    run_blocking(move || state.comments.update_comment(user.id, id, &req)).await?;
    Ok(Json(IdResponse { id }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    run_blocking(move || state.comments.delete_comment(user.id, id)).await?;
    Ok(Json(MessageResponse::new("comment deleted successfully")))
}
