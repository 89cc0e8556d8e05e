use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use chirp_types::api::{
    LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest, TokenPair, UserResponse,
};

use crate::error::{ServiceError, ServiceResult};
use crate::password::{hash_password, verify_password};
use crate::store::{CredentialStore, is_duplicate};
use crate::tokens::{generate_refresh_token, issue_access_token, refresh_token_expiry};
use crate::{format_timestamp, validation};

/// Registration, login, token refresh and logout.
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    jwt_secret: String,
}

impl UserService {
    pub fn new(store: Arc<dyn CredentialStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn register(&self, req: &RegisterRequest) -> ServiceResult<i64> {
        validation::email(&req.email)?;
        validation::require("username", &req.username)?;
        validation::min_chars("username", &req.username, validation::MIN_USERNAME_LEN)?;
        validation::require("password", &req.password)?;
        if req.password_confirm != req.password {
            return Err(ServiceError::validation("password_confirm must match password"));
        }

        if self
            .store
            .find_user_by_email_or_username(&req.email, &req.username)?
            .is_some()
        {
            return Err(ServiceError::validation("user already exists"));
        }

        let password_hash = hash_password(&req.password)?;
        let id = match self
            .store
            .create_user(&req.username, &req.email, &password_hash)
        {
            Err(e) if is_duplicate(&e) => {
                return Err(ServiceError::validation("user already exists"));
            }
            other => other?,
        };

        info!("Registered user {} ({})", id, req.username);
        Ok(id)
    }

    /// Reuses a still-valid refresh token if the user has one; only mints a
    /// new one when none is live.
    pub fn login(&self, req: &LoginRequest) -> ServiceResult<TokenPair> {
        validation::email(&req.email)?;
        validation::require("password", &req.password)?;

        let user = self
            .store
            .get_user_by_email(&req.email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&user.password, &req.password) {
            debug!("Password mismatch for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = issue_access_token(user.id, &user.username, &self.jwt_secret)?;

        let now = Utc::now();
        if let Some(existing) = self.store.find_live_refresh_token(user.id, now)? {
            return Ok(TokenPair {
                token,
                refresh_token: existing.token,
            });
        }

        let refresh_token = generate_refresh_token();
        self.store
            .store_refresh_token(user.id, &refresh_token, refresh_token_expiry(now))?;

        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    /// Rotate-on-use: the presented token is deleted and replaced, so it
    /// cannot be redeemed twice. Delete and insert are separate statements.
    pub fn refresh(&self, req: &RefreshTokenRequest) -> ServiceResult<TokenPair> {
        validation::require("refresh_token", &req.refresh_token)?;

        let now = Utc::now();
        let record = self
            .store
            .get_refresh_token(&req.refresh_token)?
            .ok_or(ServiceError::Unauthorized)?;

        if record.is_expired(now) {
            debug!("Refresh token for user {} expired at {}", record.user_id, record.expires_at);
            return Err(ServiceError::Unauthorized);
        }

        let user = self
            .store
            .get_user_by_id(record.user_id)?
            .ok_or(ServiceError::Unauthorized)?;

        let token = issue_access_token(user.id, &user.username, &self.jwt_secret)?;
        let refresh_token = generate_refresh_token();

        self.store.delete_refresh_token(&req.refresh_token)?;
        self.store
            .store_refresh_token(user.id, &refresh_token, refresh_token_expiry(now))?;

        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    /// Idempotent. Outstanding access tokens stay valid until they expire.
    pub fn logout(&self, req: &LogoutRequest) -> ServiceResult<()> {
        validation::require("refresh_token", &req.refresh_token)?;
        self.store.delete_refresh_token(&req.refresh_token)?;
        Ok(())
    }

    pub fn get_user(&self, id: i64) -> ServiceResult<UserResponse> {
        let user = self
            .store
            .get_user_by_id(id)?
            .ok_or_else(|| ServiceError::not_found("user not found"))?;

        Ok(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: format_timestamp(user.created_at),
        })
    }
}
