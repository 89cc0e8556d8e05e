//! Like, unlike and count for posts and comments.
//!
//! Both resources share one implementation keyed by [`LikeTarget`]; the thin
//! per-route handlers only pick the target kind.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use chirp_core::store::LikeTarget;
use chirp_types::api::{LikesCountResponse, MessageResponse};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::params::parse_id;
use crate::blocking::run_blocking;
use crate::state::AppState;

async fn like(state: AppState, user: AuthUser, target: LikeTarget) -> Result<impl IntoResponse, ApiError> {
    run_blocking(move || state.likes.like(user.id, target)).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("{} liked successfully", target.kind()))),
    ))
}

async fn unlike(state: AppState, user: AuthUser, target: LikeTarget) -> Result<impl IntoResponse, ApiError> {
    run_blocking(move || state.likes.unlike(user.id, target)).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} unliked successfully",
        target.kind()
    ))))
}

async fn count(state: AppState, target: LikeTarget) -> Result<impl IntoResponse, ApiError> {
    let count = run_blocking(move || state.likes.count(target)).await?;
    Ok(Json(LikesCountResponse { count }))
}

pub async fn like_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    like(state, user, LikeTarget::Post(parse_id(&id)?)).await
}

pub async fn unlike_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    unlike(state, user, LikeTarget::Post(parse_id(&id)?)).await
}

pub async fn count_post_likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    count(state, LikeTarget::Post(parse_id(&id)?)).await
}

pub async fn like_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    like(state, user, LikeTarget::Comment(parse_id(&id)?)).await
}

pub async fn unlike_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    unlike(state, user, LikeTarget::Comment(parse_id(&id)?)).await
}

pub async fn count_comment_likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    count(state, LikeTarget::Comment(parse_id(&id)?)).await
}
