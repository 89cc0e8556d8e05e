use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use chirp_types::api::{IdResponse, MessageResponse, PostRequest};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::params::{PostListQuery, parse_id};
use crate::blocking::run_blocking;
use crate::state::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let id = run_blocking(move || state.posts.create_post(user.id, &req)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let author = query.author()?;
    let page = query.to_page_request();
    let posts = run_blocking(move || state.posts.list_posts(author, page)).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let post = run_blocking(move || state.posts.get_post(id)).await?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    run_blocking(move || state.posts.update_post(user.id, id, &req)).await?;
    Ok(Json(IdResponse { id }))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    run_blocking(move || state.posts.delete_post(user.id, id)).await?;
    Ok(Json(MessageResponse::new("post deleted successfully")))
}
