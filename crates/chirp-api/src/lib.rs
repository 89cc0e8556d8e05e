pub mod auth;
mod blocking;
pub mod comments;
pub mod error;
pub mod likes;
pub mod middleware;
pub mod params;
pub mod posts;
pub mod router;
pub mod state;
pub mod users;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, AppStateInner};
