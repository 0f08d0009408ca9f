//! # Auth Errors
//!
//! Error types for the authentication module, with conversions into the
//! caller-visible taxonomy.

use thiserror::Error;

use crate::error::ApiError;
use crate::validate::Violation;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Generic on purpose - never leak whether the email exists
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Password does not meet the policy
    #[error("{0}")]
    WeakPassword(String),

    /// Bearer token is structurally invalid
    #[error("Malformed token")]
    MalformedToken,

    /// Bearer token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Bearer token signature does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// No bearer credential on the request
    #[error("Authentication required")]
    MissingToken,

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::MissingToken => ApiError::Unauthorized(err.to_string()),
            AuthError::EmailAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::WeakPassword(message) => {
                ApiError::ValidationFailed(vec![Violation::new("password", message)])
            }
            AuthError::HashingFailed | AuthError::TokenGenerationFailed => {
                ApiError::Unexpected(err.to_string())
            }
        }
    }
}
