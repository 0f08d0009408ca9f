//! # Error Taxonomy
//!
//! Every pipeline failure surfaces as one of these variants at the HTTP
//! boundary. There are no retries and no partial-success semantics: a
//! mutation either fully applies or not at all.

use thiserror::Error;

use crate::validate::Violation;

/// Result type for pipeline operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Caller-visible pipeline errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// One or more fields failed validation; storage was not touched
    #[error("Validation failed")]
    ValidationFailed(Vec<Violation>),

    /// Missing, malformed, expired, or forged credential
    #[error("{0}")]
    Unauthorized(String),

    /// Target record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate-key violation (email uniqueness)
    #[error("{0}")]
    Conflict(String),

    /// Internal failure; the HTTP envelope carries only a generic message
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Single-field validation failure
    pub fn violation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationFailed(vec![Violation::new(field, message)])
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationFailed(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            // Duplicate email maps to 400, matching the roster API contract
            ApiError::Conflict(_) => 400,
            ApiError::Unexpected(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
