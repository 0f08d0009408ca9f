//! # Validation Violations
//!
//! Field-level detail carried by `ApiError::ValidationFailed`.

use serde::Serialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, e.g. `email` or `grades[1].credits`
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
