//! # Auth Service
//!
//! Register, login, token verification, and current-user lookup over the
//! shared user store. Request bodies are checked against declarative rule
//! sets before any store access; login failures are deliberately generic.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::portal::{User, UserStore};
use crate::validate::{text_field, FieldRule, RuleSet, EMAIL_FORMAT};

use super::crypto::PasswordPolicy;
use super::errors::AuthError;
use super::jwt::{JwtConfig, JwtManager, TokenResponse};

static REGISTER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "register",
        vec![
            FieldRule::required_text("name"),
            FieldRule::required_text("email")
                .with_format(&EMAIL_FORMAT, "Please provide a valid email"),
            FieldRule::required_text("password")
                .with_min_length(6),
        ],
    )
});

static LOGIN_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "login",
        vec![
            FieldRule::required_text("email")
                .with_format(&EMAIL_FORMAT, "Please provide a valid email"),
            FieldRule::required_text("password"),
        ],
    )
});

/// Auth service combining store, policy, and token manager
pub struct AuthService<U: UserStore> {
    users: Arc<U>,
    jwt: JwtManager,
    policy: PasswordPolicy,
}

impl<U: UserStore> AuthService<U> {
    pub fn new(users: Arc<U>, jwt_config: JwtConfig, policy: PasswordPolicy) -> Self {
        Self {
            users,
            jwt: JwtManager::new(jwt_config),
            policy,
        }
    }

    /// Register a new identity. Hashing happens here and only here.
    pub fn register(&self, body: &Value) -> ApiResult<(User, TokenResponse)> {
        REGISTER_RULES.validate_create(body)?;

        let name = required_text(body, "name")?;
        let email = required_text(body, "email")?.to_lowercase();
        let password = required_text(body, "password")?;

        if self.users.email_exists(&email)? {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let user = User::new(name, email, &password, &self.policy).map_err(ApiError::from)?;
        self.users.create(&user)?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Authenticate an identity. Wrong email and wrong password are
    /// indistinguishable to the caller.
    pub fn login(&self, body: &Value) -> ApiResult<(User, TokenResponse)> {
        LOGIN_RULES.validate_create(body)?;

        let email = required_text(body, "email")?.to_lowercase();
        let password = required_text(body, "password")?;

        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)
            .map_err(ApiError::from)?;

        if !user.verify_password(&password).map_err(ApiError::from)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Stateless bearer verification: signature + expiry, then the
    /// identity id from the subject claim. No store lookup.
    pub fn verify(&self, token: &str) -> ApiResult<Uuid> {
        let claims = self.jwt.validate_token(token).map_err(ApiError::from)?;
        JwtManager::get_user_id(&claims).map_err(ApiError::from)
    }

    /// Current user by verified identity id
    pub fn current_user(&self, user_id: Uuid) -> ApiResult<User> {
        self.users
            .find_by_id(user_id)?
            .ok_or_else(|| ApiError::NotFound("User".to_string()))
    }

    fn issue_token(&self, user: &User) -> ApiResult<TokenResponse> {
        let token = self.jwt.generate_token(user).map_err(ApiError::from)?;
        Ok(TokenResponse::new(token, self.jwt.get_expiration()))
    }
}

fn required_text(body: &Value, key: &str) -> ApiResult<String> {
    text_field(body, key)
        .ok_or_else(|| ApiError::Unexpected(format!("validated body missing {}", key)))
}
