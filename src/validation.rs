//! Payload validation.
//!
//! Create/update models implement [`Validatable`]; the generic handlers
//! run validation before opening a transaction, so an invalid payload
//! never touches the store.

use std::fmt;

/// Validation error with field name and message
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Trait for types that can be validated.
///
/// Return `Ok(())` if valid, or the first failing check otherwise.
pub trait Validatable {
    /// Validate the instance
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first failing field.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Helper validators for common patterns
pub mod validators {
    use super::ValidationError;

    /// Validate value is not empty or whitespace-only
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value is blank.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }

    /// Basic email validation
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value does not look like an
    /// email address or exceeds 255 characters.
    pub fn validate_email(field: &str, value: &str) -> Result<(), ValidationError> {
        if !value.contains('@') || !value.contains('.') {
            return Err(ValidationError::new(field, "Invalid email format"));
        }

        if value.len() > 255 {
            return Err(ValidationError::new(
                field,
                "Email must be at most 255 characters",
            ));
        }

        Ok(())
    }

    /// Validate string length is within range
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the length falls outside the
    /// given bounds.
    pub fn validate_length(
        field: &str,
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.len();

        if let Some(min_len) = min {
            if len < min_len {
                return Err(ValidationError::new(
                    field,
                    format!("Must be at least {min_len} characters"),
                ));
            }
        }

        if let Some(max_len) = max {
            if len > max_len {
                return Err(ValidationError::new(
                    field,
                    format!("Must be at most {max_len} characters"),
                ));
            }
        }

        Ok(())
    }
}
