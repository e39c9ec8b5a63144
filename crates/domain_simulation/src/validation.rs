//! Product rules for simulation parameters
//!
//! These are the limits of the financing product itself. The HTTP request
//! schema enforces its own, narrower bounds; the two layers are kept apart
//! on purpose and may disagree at the edges.
//!
//! | Field | Rule |
//! |---|---|
//! | `totalAmount` | `> 0` and `<= 50000` |
//! | `numberOfInstallments` | `> 0` and `<= 36` |
//! | `monthlyInterestRate` | `>= 0` and `<= 0.15` |

use core_kernel::ValidationResult;

use crate::simulation::SimulationParameters;

/// Largest principal the product finances, in BRL
pub const MAX_TOTAL_AMOUNT: f64 = 50_000.0;
/// Longest term, in months
pub const MAX_INSTALLMENTS: i32 = 36;
/// Highest monthly rate, as a fraction
pub const MAX_MONTHLY_INTEREST_RATE: f64 = 0.15;

pub const FIELD_TOTAL_AMOUNT: &str = "totalAmount";
pub const FIELD_INSTALLMENTS: &str = "numberOfInstallments";
pub const FIELD_INTEREST_RATE: &str = "monthlyInterestRate";

/// Validator for simulation parameters
pub struct SimulationValidator;

impl SimulationValidator {
    /// Checks every rule and returns all violations, in rule order
    ///
    /// # Examples
    ///
    /// ```rust
    /// use domain_simulation::SimulationValidator;
    ///
    /// let result = SimulationValidator::validate(20_000.0, 0.20, 24);
    /// assert!(!result.is_valid);
    /// assert!(result.messages()[0].contains("15%"));
    /// ```
    pub fn validate(
        total_amount: f64,
        monthly_interest_rate: f64,
        number_of_installments: i32,
    ) -> ValidationResult {
        let mut result = ValidationResult::ok();

        result.check(
            total_amount > 0.0,
            FIELD_TOTAL_AMOUNT,
            "Total amount must be greater than zero",
        );
        result.check(
            total_amount <= MAX_TOTAL_AMOUNT,
            FIELD_TOTAL_AMOUNT,
            "Total amount cannot exceed R$ 50.000",
        );
        result.check(
            number_of_installments > 0,
            FIELD_INSTALLMENTS,
            "Number of installments must be greater than zero",
        );
        result.check(
            number_of_installments <= MAX_INSTALLMENTS,
            FIELD_INSTALLMENTS,
            "Number of installments cannot exceed 36 months",
        );
        result.check(
            monthly_interest_rate >= 0.0,
            FIELD_INTEREST_RATE,
            "Interest rate cannot be negative",
        );
        result.check(
            monthly_interest_rate <= MAX_MONTHLY_INTEREST_RATE,
            FIELD_INTEREST_RATE,
            "Monthly interest rate cannot exceed 15%",
        );

        result
    }

    /// Validates a parameter set
    pub fn validate_parameters(params: &SimulationParameters) -> ValidationResult {
        Self::validate(
            params.total_amount,
            params.monthly_interest_rate,
            params.number_of_installments,
        )
    }
}
