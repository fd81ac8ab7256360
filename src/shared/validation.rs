//! Validation Utilities
//!
//! Rules are declared on DTOs with `validator`; every boundary calls
//! [`validate`] explicitly and gets typed field errors back.

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Run the declared rules of `value`.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(validation_error)
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect(&errors, None, &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::Validation(field_errors)
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: field.clone(),
                    message: message_of(e),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, Some(&field), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, Some(&format!("{}[{}]", field, index)), out);
                }
            }
        }
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .clone()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// Password must mix lower case, upper case, digits and symbols.
pub fn strong_password(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    if password.chars().count() >= 8 && has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("strong_password").with_message(
            "Password must be at least 8 characters and contain lower case, upper case, a digit and a symbol"
                .into(),
        ))
    }
}

/// Content must contain something other than whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank").with_message("Must not be blank".into()))
    } else {
        Ok(())
    }
}
