use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use chirp_core::ServiceError;
use chirp_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Malformed body, path or query parameter.
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("background task failed")]
    Join,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) | ServiceError::InvalidCredentials => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            ApiError::Join => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Service(ServiceError::Internal(e)) => {
                error!("Internal error: {:#}", e);
                "internal server error".to_string()
            }
            ApiError::Join => "internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
