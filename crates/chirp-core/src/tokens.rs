use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngCore;

use chirp_types::api::Claims;

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 60;
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// 18 random bytes, 36 hex characters once encoded.
const REFRESH_TOKEN_BYTES: usize = 18;

/// Sign an HS256 access token carrying `{id, username, exp}`.
/// There is no revocation: the token is valid until `exp`.
pub fn issue_access_token(user_id: i64, username: &str, secret: &str) -> anyhow::Result<String> {
    issue_access_token_at(user_id, username, secret, Utc::now())
}

pub(crate) fn issue_access_token_at(
    user_id: i64,
    username: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Opaque bearer credential for the refresh flow.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn refresh_token_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(REFRESH_TOKEN_TTL_DAYS)
}
