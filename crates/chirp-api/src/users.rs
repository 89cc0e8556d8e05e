use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::error::ApiError;
use crate::params::parse_id;
use crate::blocking::run_blocking;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let user = run_blocking(move || state.users.get_user(id)).await?;
    Ok(Json(user))
}
