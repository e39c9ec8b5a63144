//! Student domain errors

use core_kernel::{PortError, ValidationResult};
use thiserror::Error;

/// Errors that can occur in the student domain
#[derive(Debug, Error)]
pub enum StudentError {
    /// Input rules failed
    #[error("Invalid student data: {}", .0.messages().join("; "))]
    ValidationFailed(ValidationResult),

    /// Another account already uses this email
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The current password given for a password change did not verify
    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Student not found: {0}")]
    NotFound(String),

    /// Hashing or parsing a stored hash failed
    #[error("Password hashing error: {0}")]
    Password(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl StudentError {
    /// Returns the failed rules when this is a validation failure
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            StudentError::ValidationFailed(result) => Some(result),
            _ => None,
        }
    }
}

impl From<ValidationResult> for StudentError {
    fn from(result: ValidationResult) -> Self {
        StudentError::ValidationFailed(result)
    }
}
