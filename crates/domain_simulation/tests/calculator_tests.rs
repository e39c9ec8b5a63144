//! Calculator and Validator Tests
//!
//! Concrete loan scenarios plus property tests over the product's parameter
//! space.
//!
//! # Test Organization
//!
//! - `scenarios` - worked examples with known figures
//! - `validator` - product rule boundaries
//! - `properties` - proptest invariants of the Price formula and of stored
//!   simulations

use domain_simulation::calculator::{
    compute_monthly_installment, compute_total_interest, interest_percentage, round_to_cents,
    total_to_pay,
};
use domain_simulation::{
    FinancingSimulation, SimulationError, SimulationParameters, SimulationValidator,
};

mod scenarios {
    use super::*;

    /// 10,000 at 3.49% a month over 12 months
    #[test]
    fn test_twelve_month_loan() {
        let installment = compute_monthly_installment(10_000.0, 0.0349, 12).unwrap();

        assert_eq!(installment, 1034.23);
        assert_eq!(round_to_cents(total_to_pay(installment, 12)), 12410.76);
        assert_eq!(compute_total_interest(10_000.0, installment, 12), 2410.76);
    }

    /// Interest-free loans divide evenly and show the rounding drift
    #[test]
    fn test_interest_free_loan() {
        let installment = compute_monthly_installment(5_000.0, 0.0, 6).unwrap();

        assert_eq!(installment, 833.33);
        assert_eq!(compute_total_interest(5_000.0, installment, 6), -0.02);
    }

    #[test]
    fn test_negative_principal_is_invalid_argument() {
        let result = compute_monthly_installment(-100.0, 0.05, 12);
        assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
    }

    /// Highest rate and longest term at the product ceiling
    #[test]
    fn test_product_ceiling() {
        let installment = compute_monthly_installment(50_000.0, 0.15, 36).unwrap();
        assert_eq!(installment, 7549.29);
    }

    #[test]
    fn test_single_installment_pays_one_period_of_interest() {
        let installment = compute_monthly_installment(1_000.0, 0.1, 1).unwrap();
        assert_eq!(installment, 1100.0);
    }

    #[test]
    fn test_interest_percentage_of_twelve_month_loan() {
        let interest = compute_total_interest(10_000.0, 1034.23, 12);
        assert_eq!(interest_percentage(interest, 10_000.0).unwrap(), 24.11);
    }
}

mod validator {
    use super::*;

    #[test]
    fn test_rate_above_fifteen_percent() {
        let result = SimulationValidator::validate(20_000.0, 0.20, 24);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "monthlyInterestRate");
        assert!(result.errors[0].message.contains("15%"));
    }

    #[test]
    fn test_too_many_installments() {
        let result = SimulationValidator::validate(20_000.0, 0.02, 37);
        assert!(result.has_error_for("numberOfInstallments"));
    }

    #[test]
    fn test_validator_is_looser_than_request_schema() {
        // 1,000 over 2 months is below the request schema minimums but
        // within the product rules.
        assert!(SimulationValidator::validate(1_000.0, 0.01, 2).is_valid);
    }
}

mod properties {
    use super::*;
    use core_kernel::{Currency, Money, StudentId};
    use proptest::prelude::*;

    fn amount() -> impl Strategy<Value = f64> {
        (500_000i64..=5_000_000i64).prop_map(|cents| cents as f64 / 100.0)
    }

    fn positive_rate() -> impl Strategy<Value = f64> {
        (10u32..=1500u32).prop_map(|bp| f64::from(bp) / 10_000.0)
    }

    proptest! {
        #[test]
        fn zero_rate_is_rounded_division(amount in amount(), n in 1i32..=36) {
            let installment = compute_monthly_installment(amount, 0.0, n).unwrap();
            prop_assert_eq!(installment, round_to_cents(amount / f64::from(n)));
        }

        #[test]
        fn positive_rate_costs_at_least_the_principal(
            amount in amount(),
            rate in positive_rate(),
            n in 1i32..=36
        ) {
            let installment = compute_monthly_installment(amount, rate, n).unwrap();
            prop_assert!(installment * f64::from(n) >= amount);
            prop_assert!(compute_total_interest(amount, installment, n) > 0.0);
        }

        #[test]
        fn calculator_is_deterministic(
            amount in amount(),
            rate in positive_rate(),
            n in 1i32..=36
        ) {
            let first = compute_monthly_installment(amount, rate, n).unwrap();
            let second = compute_monthly_installment(amount, rate, n).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn installment_has_at_most_two_decimals(
            amount in amount(),
            rate in positive_rate(),
            n in 1i32..=36
        ) {
            let installment = compute_monthly_installment(amount, rate, n).unwrap();
            prop_assert_eq!(round_to_cents(installment), installment);
        }

        #[test]
        fn valid_parameters_always_compute(
            amount in amount(),
            rate in 0u32..=1500u32,
            n in 1i32..=36
        ) {
            let rate = f64::from(rate) / 10_000.0;
            prop_assert!(SimulationValidator::validate(amount, rate, n).is_valid);
            prop_assert!(compute_monthly_installment(amount, rate, n).is_ok());
        }

        #[test]
        fn stored_simulation_reprices_to_its_installment(
            amount in 1.0f64..=50_000.0,
            rate in 0.0f64..=0.15,
            n in 1i32..=36
        ) {
            let params = SimulationParameters::new(amount, rate, n);
            let sim = FinancingSimulation::create(StudentId::new(), &params).unwrap();

            let stored = sim.parameters();
            let recomputed = compute_monthly_installment(
                stored.total_amount,
                stored.monthly_interest_rate,
                stored.number_of_installments,
            )
            .unwrap();
            prop_assert_eq!(Money::from_f64(recomputed, Currency::BRL).unwrap(), sim.monthly_installment);
        }
    }
}
