use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};

use chirp_core::ServiceError;
use chirp_types::api::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    RegisterResponse,
};

use crate::error::ApiError;
use crate::blocking::run_blocking;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let id = run_blocking(move || state.users.register(&req)).await?;
    Ok(Json(RegisterResponse { id }))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let pair = run_blocking(move || state.users.login(&req)).await?;
    Ok(Json(pair))
}

pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let pair = run_blocking(move || state.users.refresh(&req))
        .await
        .map_err(|e| match e {
            ApiError::Service(ServiceError::Unauthorized) => ApiError::InvalidRefreshToken,
            other => other,
        })?;
    Ok(Json(pair))
}

pub async fn logout(
    State(state): State<AppState>,
    body: Result<Json<LogoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    run_blocking(move || state.users.logout(&req)).await?;
    Ok(Json(MessageResponse::new("logged out successfully")))
}
