//! Custom Test Assertions
//!
//! Assertion helpers that print the figures involved when they fail.

use core_kernel::{Currency, Money, ValidationResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

/// Asserts a BRL amount equals `expected` to the cent
pub fn assert_brl(actual: &Money, expected: f64) {
    assert_eq!(actual.currency(), Currency::BRL, "Expected BRL, got {}", actual.currency());
    let expected = Decimal::from_f64(expected)
        .map(|d| d.round_dp(2))
        .unwrap_or_else(|| panic!("{expected} is not representable"));
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual.amount(),
        expected
    );
}

/// Asserts two floats agree to the cent
pub fn assert_cents_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "Amounts differ: actual={actual}, expected={expected}"
    );
}

/// Asserts that a validation result flags `field`
pub fn assert_field_error(result: &ValidationResult, field: &str) {
    assert!(
        result.has_error_for(field),
        "Expected an error for '{}', got {:?}",
        field,
        result.errors
    );
}

/// Asserts an API error body has the given `error` code
pub fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(
        body["error"].as_str(),
        Some(code),
        "Unexpected error body: {body}"
    );
}

/// Asserts an API error body lists a detail for `field`
pub fn assert_error_detail(body: &Value, field: &str) {
    let found = body["details"]
        .as_array()
        .map(|details| details.iter().any(|d| d["field"] == field))
        .unwrap_or(false);
    assert!(found, "No detail for '{field}' in {body}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_assert_brl() {
        assert_brl(&Money::brl(dec!(1034.23)), 1034.23);
    }

    #[test]
    #[should_panic(expected = "Money mismatch")]
    fn test_assert_brl_mismatch() {
        assert_brl(&Money::brl(dec!(1034.23)), 1034.24);
    }

    #[test]
    fn test_error_body_helpers() {
        let body = json!({
            "error": "validation_error",
            "message": "Invalid request data",
            "details": [{"field": "email", "message": "Invalid email format"}]
        });
        assert_error_code(&body, "validation_error");
        assert_error_detail(&body, "email");
    }

    #[test]
    fn test_field_error() {
        let mut result = ValidationResult::ok();
        result.add_error("email", "Invalid email format");
        assert_field_error(&result, "email");
    }
}
