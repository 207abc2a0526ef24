//! Validation traits shared by the form and upload layers.
//!
//! Draft payloads implement [`Validatable`] so the admin forms can reject
//! bad input before any backend round-trip.

use thiserror::Error;

/// Validation failure with field context.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Required field missing: {field}")]
    Required { field: String },

    #[error("Value out of range for {field}: expected {expected}, got {actual}")]
    OutOfRange {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Types that can validate themselves.
pub trait Validatable {
    fn validate(&self) -> Result<(), ValidationError>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A reusable check over a single value.
pub trait Validator<T> {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

/// Rejects empty or whitespace-only strings.
pub struct NonEmptyStringValidator {
    field_name: String,
}

impl NonEmptyStringValidator {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Validator<String> for NonEmptyStringValidator {
    fn validate(&self, value: &String) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: self.field_name.clone(),
            });
        }
        Ok(())
    }
}

/// Caps a string at a maximum length in characters.
pub struct MaxLengthValidator {
    field_name: String,
    max_chars: usize,
}

impl MaxLengthValidator {
    pub fn new(field_name: impl Into<String>, max_chars: usize) -> Self {
        Self {
            field_name: field_name.into(),
            max_chars,
        }
    }
}

impl Validator<String> for MaxLengthValidator {
    fn validate(&self, value: &String) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if len > self.max_chars {
            return Err(ValidationError::OutOfRange {
                field: self.field_name.clone(),
                expected: format!("at most {} characters", self.max_chars),
                actual: len.to_string(),
            });
        }
        Ok(())
    }
}
