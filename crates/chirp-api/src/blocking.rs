use chirp_core::ServiceResult;
use tracing::error;

use crate::error::ApiError;

/// Run a synchronous service call off the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Join
        })?
        .map_err(ApiError::from)
}
