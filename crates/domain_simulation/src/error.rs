//! Simulation domain errors

use core_kernel::{MoneyError, ValidationResult};
use thiserror::Error;

/// Errors that can occur in the simulation domain
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A calculator precondition was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more product rules failed
    #[error("Invalid simulation parameters: {}", .0.messages().join("; "))]
    ValidationFailed(ValidationResult),

    /// A computed figure could not be represented as money
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl SimulationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SimulationError::InvalidArgument(message.into())
    }

    /// Returns the failed rules when this is a validation failure
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            SimulationError::ValidationFailed(result) => Some(result),
            _ => None,
        }
    }
}
