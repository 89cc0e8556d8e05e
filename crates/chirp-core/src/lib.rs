pub mod comments;
pub mod error;
pub mod gate;
pub mod likes;
pub mod ownership;
pub mod pagination;
pub mod password;
pub mod posts;
pub mod store;
pub mod tokens;
pub mod users;
mod validation;

#[cfg(test)]
mod memory;

pub use error::{ServiceError, ServiceResult};

use chirp_types::models::TIMESTAMP_FORMAT;
use chrono::{DateTime, Utc};

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
