//! Access-token verification for protected requests.
//!
//! A request moves through header parsing, signature/expiry verification and
//! identity extraction. Any failure rejects the request; only a fully valid
//! token yields an [`Identity`].

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde_json::Value;
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller, attached to the request for handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("missing authorization header")]
    NoHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("token is not a valid JWT")]
    InvalidToken,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token carries no numeric id claim")]
    MissingIdentityClaim,
}

/// Run the whole gate over the raw `Authorization` header value.
pub fn authenticate(header: Option<&str>, secret: &str) -> Result<Identity, GateRejection> {
    let header = header.ok_or(GateRejection::NoHeader)?;
    let token = bearer_token(header).ok_or(GateRejection::MalformedHeader)?;
    verify_access_token(token, secret)
}

/// Exactly `Bearer <token>`: one space, one non-empty token, nothing after it.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Identity, GateRejection> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Value>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => GateRejection::Expired,
            ErrorKind::InvalidSignature => GateRejection::InvalidSignature,
            _ => GateRejection::InvalidToken,
        })?;

    let id = data
        .claims
        .get("id")
        .and_then(numeric_id)
        .ok_or(GateRejection::MissingIdentityClaim)?;

    let username = data
        .claims
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Identity { id, username })
}

/// Integers, or floats with no fractional part (some JWT libraries emit those).
fn numeric_id(value: &Value) -> Option<i64> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
