use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use chirp_core::gate::{self, Identity};

use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity, inserted into request extensions for protected handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
        }
    }
}

/// Extract and validate the JWT from the Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let identity = gate::authenticate(auth_header, &state.jwt_secret).map_err(|rejection| {
        debug!("Rejected {} {}: {}", req.method(), req.uri().path(), rejection);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser::from(identity));
    Ok(next.run(req).await)
}
