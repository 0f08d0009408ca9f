//! # Response Envelopes
//!
//! Every response carries `{success: bool, ...}`; error envelopes carry
//! either a `message` or a field-level `errors` list, never both.

use serde::Serialize;

use crate::validate::Violation;

/// Acknowledgement envelope
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Violation>>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn violations(violations: Vec<Violation>) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(violations),
        }
    }
}
