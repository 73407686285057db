//! Shared Error Types
//!
//! Errors that are detected locally, before any request leaves the device.
//! Every form and the admin login report missing or out-of-range input
//! through [`ValidationError`] so the screens can show it inline.
//!
//! # Usage
//!
//! ```rust
//! use grievance_desk::shared::error::ValidationError;
//!
//! let error = ValidationError::new("employee_id", "Employee ID cannot be empty.");
//! assert_eq!(error.field, "employee_id");
//! ```
use thiserror::Error;

/// Local input validation failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Validation error for a required field left blank
    pub fn required(field: impl Into<String>, label: &str) -> Self {
        Self::new(field, format!("{} cannot be empty.", label))
    }
}

/// Return the trimmed value, or a `required` error when nothing is left.
pub fn require_trimmed<'a>(
    value: &'a str,
    field: &str,
    label: &str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field, label));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ValidationError::new("email", "Invalid email format");
        assert_eq!(error.field, "email");
        assert_eq!(error.message, "Invalid email format");
    }

    #[test]
    fn test_required_message() {
        let error = ValidationError::required("password", "Password");
        assert_eq!(error.message, "Password cannot be empty.");
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::new("employee_id", "Test error");
        let display = format!("{}", error);
        assert!(display.contains("employee_id"));
        assert!(display.contains("Test error"));
    }

    #[test]
    fn test_require_trimmed() {
        assert_eq!(require_trimmed("  101 ", "employee_id", "Employee ID"), Ok("101"));
        assert!(require_trimmed("   ", "employee_id", "Employee ID").is_err());
        assert!(require_trimmed("", "employee_id", "Employee ID").is_err());
    }
}
