//! HTTP handlers for the Crop Advisor Platform

mod advisor;
mod health;
mod profitability;

pub use advisor::*;
pub use health::*;
pub use profitability::*;

use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Run derive-based validation, reporting the first failing field
pub(crate) fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let field_errors = errors.field_errors();
        let first = field_errors
            .iter()
            .min_by_key(|(field, _)| **field)
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            });

        match first {
            Some((field, message)) => AppError::validation(field, message),
            None => AppError::validation("request", "Invalid request"),
        }
    })
}

/// Adapt a shared validation result into a `validator` error
pub(crate) fn validation_rule(
    code: &'static str,
    result: Result<(), &'static str>,
) -> Result<(), ValidationError> {
    result.map_err(|message| {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    })
}
