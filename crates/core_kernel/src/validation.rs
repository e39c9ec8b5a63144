//! Field-tagged validation results
//!
//! Validators in the domain crates collect every violated rule instead of
//! stopping at the first one, so the caller can surface all problems at once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single violated rule, tagged with the input field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of running a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether every rule passed
    pub is_valid: bool,
    /// Every violated rule, in rule order
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
        self.is_valid = false;
    }

    /// Adds an error when `condition` does not hold
    pub fn check(&mut self, condition: bool, field: &str, message: impl Into<String>) {
        if !condition {
            self.add_error(field, message);
        }
    }

    /// Returns the human-readable messages, without field tags
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Returns true if any error concerns `field`
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Converts into a `Result`, yielding `Err(self)` when any rule failed
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_errors() {
        let mut result = ValidationResult::ok();
        result.check(false, "a", "first");
        result.check(true, "b", "never");
        result.check(false, "c", "third");

        assert!(!result.is_valid);
        assert_eq!(result.messages(), vec!["first", "third"]);
        assert!(result.has_error_for("c"));
        assert!(!result.has_error_for("b"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut result = ValidationResult::ok();
        result.add_error("totalAmount", "too large");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["field"], "totalAmount");
    }
}
