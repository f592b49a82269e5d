//! Validation errors raised before anything is sent to the backend

use thiserror::Error;

/// Client-side validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A star rating outside 1..=5
    #[error("{field} must be rated between 1 and 5 (got {value})")]
    RatingOutOfRange { field: &'static str, value: u8 },

    /// A required field is empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Date string in neither `YYYY-MM-DD` nor `DD/MM/YYYY`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Number field that does not parse
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::RatingOutOfRange {
            field: "atendimento",
            value: 7,
        };
        assert_eq!(
            err.to_string(),
            "atendimento must be rated between 1 and 5 (got 7)"
        );
        assert_eq!(
            ValidationError::MissingField("email").to_string(),
            "email is required"
        );
    }
}
