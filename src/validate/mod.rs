//! Field validation for incoming request bodies
//!
//! Rules are declared once per record type and reused for create and
//! update. Validation fails closed: any violation blocks the whole
//! mutation, and a failing body never reaches storage.
//!
//! # Design Principles
//!
//! - Unknown fields are ignored, never merged
//! - JSON `null` is treated as absent
//! - Patch mode treats present-but-empty text as absent
//! - Violations are reported per field, in rule order

mod body;
mod errors;
mod rules;
mod validator;

pub use body::{date_field, float_field, int_field, string_list_field, text_field};
pub use errors::Violation;
pub use rules::{FieldKind, FieldRule, RuleSet, EMAIL_FORMAT};
pub use validator::parse_date;
