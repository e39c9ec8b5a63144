//! Property-Based Test Generators
//!
//! Proptest strategies for simulation parameters and student input.

use domain_simulation::SimulationParameters;
use proptest::prelude::*;

/// Amounts accepted by the request schema, whole cents
pub fn schema_amount_strategy() -> impl Strategy<Value = f64> {
    (500_000i64..=5_000_000i64).prop_map(|cents| cents as f64 / 100.0)
}

/// Rates accepted by the request schema, in basis points
pub fn schema_rate_strategy() -> impl Strategy<Value = f64> {
    (0u32..=1500u32).prop_map(|bp| f64::from(bp) / 10_000.0)
}

pub fn schema_installments_strategy() -> impl Strategy<Value = i32> {
    6i32..=36
}

/// Parameters that pass both the request schema and the product rules
pub fn simulation_params_strategy() -> impl Strategy<Value = SimulationParameters> {
    (
        schema_amount_strategy(),
        schema_rate_strategy(),
        schema_installments_strategy(),
    )
        .prop_map(|(amount, rate, n)| SimulationParameters::new(amount, rate, n))
}

/// Rates above the 15% monthly ceiling
pub fn excessive_rate_strategy() -> impl Strategy<Value = f64> {
    (1501u32..=10_000u32).prop_map(|bp| f64::from(bp) / 10_000.0)
}

/// Names of at least two letters
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,20}"
}

pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,10}", "[a-z]{3,8}").prop_map(|(user, domain)| format!("{user}@{domain}.com"))
}

/// Passwords within the 8..=22 length window
pub fn password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{8,22}"
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_simulation::SimulationValidator;

    proptest! {
        #[test]
        fn generated_params_pass_product_rules(params in simulation_params_strategy()) {
            prop_assert!(SimulationValidator::validate_parameters(&params).is_valid);
        }

        #[test]
        fn excessive_rates_fail(rate in excessive_rate_strategy()) {
            let result = SimulationValidator::validate(10_000.0, rate, 12);
            prop_assert!(result.has_error_for("monthlyInterestRate"));
        }

        #[test]
        fn passwords_fit_length_window(pw in password_strategy()) {
            prop_assert!((8..=22).contains(&pw.len()));
        }
    }
}
