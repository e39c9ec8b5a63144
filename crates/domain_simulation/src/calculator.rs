//! Price (French) amortization calculator
//!
//! Fixed payment per period:
//!
//! ```text
//! PMT = PV * (i / (1 - (1 + i)^-n))
//! ```
//!
//! where `PV` is the principal, `i` the monthly rate and `n` the number of
//! monthly installments. All functions here are pure and work on `f64`;
//! results agree with other implementations to the rounded cent, not
//! bit for bit.

use tracing::debug;

use crate::error::SimulationError;

/// Rounds to two decimal places, half away from zero
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the fixed monthly installment
///
/// # Arguments
///
/// * `total_amount` - Principal financed (PV)
/// * `monthly_interest_rate` - Monthly rate as a fraction (i)
/// * `number_of_installments` - Term in months (n)
///
/// # Errors
///
/// `SimulationError::InvalidArgument` when the amount is not positive, the
/// rate is negative, or (with a non-zero rate) the term is not positive.
///
/// A zero rate short-circuits to `total_amount / n` before the term is
/// checked, so a zero term on that path yields a non-finite value rather
/// than an error. The parameter validator rejects such a term upstream.
pub fn compute_monthly_installment(
    total_amount: f64,
    monthly_interest_rate: f64,
    number_of_installments: i32,
) -> Result<f64, SimulationError> {
    if !total_amount.is_finite() || total_amount <= 0.0 {
        return Err(SimulationError::invalid_argument(
            "Total amount must be greater than zero",
        ));
    }

    if !monthly_interest_rate.is_finite() || monthly_interest_rate < 0.0 {
        return Err(SimulationError::invalid_argument(
            "Interest rate cannot be negative",
        ));
    }

    let periods = f64::from(number_of_installments);

    if monthly_interest_rate == 0.0 {
        return Ok(round_to_cents(total_amount / periods));
    }

    if number_of_installments <= 0 {
        return Err(SimulationError::invalid_argument(
            "Number of installments must be greater than zero",
        ));
    }

    // 1 - discount factor over n periods
    let denominator = 1.0 - (1.0 + monthly_interest_rate).powf(-periods);
    let payment = total_amount * (monthly_interest_rate / denominator);

    debug!(
        total_amount,
        monthly_interest_rate,
        number_of_installments,
        payment,
        "Computed monthly installment"
    );

    Ok(round_to_cents(payment))
}

/// Total interest paid over the life of the loan
///
/// Works from the already-rounded installment, so the figure can drift a
/// cent or two from the sum of the true per-period interest.
pub fn compute_total_interest(
    total_amount: f64,
    monthly_installment: f64,
    number_of_installments: i32,
) -> f64 {
    let total_paid = total_to_pay(monthly_installment, number_of_installments);
    round_to_cents(total_paid - total_amount)
}

/// Sum of all installments
pub fn total_to_pay(monthly_installment: f64, number_of_installments: i32) -> f64 {
    monthly_installment * f64::from(number_of_installments)
}

/// Total interest as a percentage of the principal, to two places
pub fn interest_percentage(total_interest: f64, total_amount: f64) -> Result<f64, SimulationError> {
    if total_amount == 0.0 {
        return Err(SimulationError::invalid_argument(
            "Total amount must be non-zero to compute an interest percentage",
        ));
    }
    Ok(round_to_cents(total_interest / total_amount * 100.0))
}
