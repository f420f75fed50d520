//! Validation Utilities

use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let field_errors = field_errors(&errors);

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::InvalidFields(message, field_errors)
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
            })
        })
        .collect();
    // HashMap iteration order is arbitrary
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}
