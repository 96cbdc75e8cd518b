//! Validation utilities.

use crate::{BehemothError, FieldError};
use validator::ValidationErrors;

/// Maximum username length in characters.
pub const USERNAME_MAX_LEN: u64 = 50;

/// Maximum bio length in characters.
pub const BIO_MAX_LEN: u64 = 500;

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    // HashMap iteration order is not stable
    field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    field_errors
}

/// Converts `validator::ValidationErrors` to `BehemothError`.
#[must_use]
pub fn validation_errors_to_behemoth_error(errors: ValidationErrors) -> BehemothError {
    let details = field_errors(&errors);

    let message = details
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    BehemothError::Validation { message, details }
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
