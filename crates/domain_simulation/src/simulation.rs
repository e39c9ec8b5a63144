//! Simulation records and derived results
//!
//! Only the inputs and the monthly installment are stored. Total interest,
//! total to pay and interest percentage are recomputed every time a record
//! is read.

use chrono::{DateTime, Utc};
use core_kernel::money::round_half_away;
use core_kernel::{Currency, Money, MoneyError, Rate, SimulationId, StudentId};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::{
    compute_monthly_installment, compute_total_interest, interest_percentage, total_to_pay,
};
use crate::error::SimulationError;
use crate::validation::SimulationValidator;

/// Inputs of a simulation request, as plain numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Principal financed, in BRL
    pub total_amount: f64,
    /// Monthly rate as a fraction (0.035 = 3.5%)
    pub monthly_interest_rate: f64,
    /// Term in months
    pub number_of_installments: i32,
}

impl SimulationParameters {
    pub fn new(total_amount: f64, monthly_interest_rate: f64, number_of_installments: i32) -> Self {
        Self {
            total_amount,
            monthly_interest_rate,
            number_of_installments,
        }
    }
}

/// Inputs at stored precision with the installment they produce
struct Priced {
    total_amount: Money,
    monthly_interest_rate: Rate,
    monthly_installment: f64,
}

/// Validates the request, rounds the amount to the cent and the rate to four
/// places, then prices the rounded inputs
fn price(params: &SimulationParameters) -> Result<Priced, SimulationError> {
    SimulationValidator::validate_parameters(params)
        .into_result()
        .map_err(SimulationError::ValidationFailed)?;

    let total_amount = Money::from_f64(params.total_amount, Currency::BRL)?;
    let monthly_interest_rate = Rate::from_f64(params.monthly_interest_rate)?;
    let monthly_installment = compute_monthly_installment(
        total_amount.to_f64(),
        monthly_interest_rate.to_f64(),
        params.number_of_installments,
    )?;

    Ok(Priced {
        total_amount,
        monthly_interest_rate,
        monthly_installment,
    })
}

/// Figures derived from a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub total_to_pay: Money,
    /// Total interest over principal, in percent, two places
    pub interest_percentage: Decimal,
}

impl SimulationResult {
    /// Derives the totals from an already computed installment
    pub fn derive(
        total_amount: f64,
        monthly_installment: f64,
        number_of_installments: i32,
    ) -> Result<Self, SimulationError> {
        let total_interest =
            compute_total_interest(total_amount, monthly_installment, number_of_installments);
        let total_paid = total_to_pay(monthly_installment, number_of_installments);
        let percentage = interest_percentage(total_interest, total_amount)?;

        Ok(Self {
            monthly_installment: Money::from_f64(monthly_installment, Currency::BRL)?,
            total_interest: Money::from_f64(total_interest, Currency::BRL)?,
            total_to_pay: Money::from_f64(total_paid, Currency::BRL)?,
            interest_percentage: percentage_to_decimal(percentage)?,
        })
    }
}

/// Validates and computes a simulation without storing it
///
/// # Errors
///
/// `SimulationError::ValidationFailed` carrying every violated rule, or
/// `SimulationError::InvalidArgument` from the calculator.
pub fn quote(params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
    let priced = price(params)?;

    debug!(?params, installment = priced.monthly_installment, "Quoted simulation");

    SimulationResult::derive(
        priced.total_amount.to_f64(),
        priced.monthly_installment,
        params.number_of_installments,
    )
}

/// A stored financing simulation belonging to a student
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingSimulation {
    pub id: SimulationId,
    pub student_id: StudentId,
    pub total_amount: Money,
    pub monthly_interest_rate: Rate,
    pub number_of_installments: i32,
    pub monthly_installment: Money,
    pub created_at: DateTime<Utc>,
}

impl FinancingSimulation {
    /// Validates the parameters and computes the installment for a new record
    ///
    /// The installment is priced from the amount and rate as stored, so
    /// recomputing it from `parameters()` gives the same figure.
    pub fn create(
        student_id: StudentId,
        params: &SimulationParameters,
    ) -> Result<Self, SimulationError> {
        let priced = price(params)?;

        let simulation = Self {
            id: SimulationId::new_v7(),
            student_id,
            total_amount: priced.total_amount,
            monthly_interest_rate: priced.monthly_interest_rate,
            number_of_installments: params.number_of_installments,
            monthly_installment: Money::from_f64(priced.monthly_installment, Currency::BRL)?,
            created_at: Utc::now(),
        };

        info!(
            simulation_id = %simulation.id,
            student_id = %student_id,
            installment = %simulation.monthly_installment,
            "Created financing simulation"
        );

        Ok(simulation)
    }

    /// Returns the stored inputs as plain numbers
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters::new(
            self.total_amount.to_f64(),
            self.monthly_interest_rate.to_f64(),
            self.number_of_installments,
        )
    }

    /// Recomputes the derived figures from the stored fields
    pub fn result(&self) -> Result<SimulationResult, SimulationError> {
        SimulationResult::derive(
            self.total_amount.to_f64(),
            self.monthly_installment.to_f64(),
            self.number_of_installments,
        )
    }

    /// Combines the stored fields with the derived figures
    pub fn view(&self) -> Result<SimulationView, SimulationError> {
        let result = self.result()?;
        Ok(SimulationView {
            id: self.id,
            total_amount: self.total_amount,
            number_of_installments: self.number_of_installments,
            monthly_interest_rate: self.monthly_interest_rate,
            monthly_installment: self.monthly_installment,
            created_at: self.created_at,
            total_interest: result.total_interest,
            total_to_pay: result.total_to_pay,
            interest_percentage: result.interest_percentage,
        })
    }

    /// Total interest for this record, as money
    pub fn total_interest(&self) -> Result<Money, SimulationError> {
        let interest = compute_total_interest(
            self.total_amount.to_f64(),
            self.monthly_installment.to_f64(),
            self.number_of_installments,
        );
        Ok(Money::from_f64(interest, Currency::BRL)?)
    }
}

/// A simulation as shown to its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationView {
    pub id: SimulationId,
    pub total_amount: Money,
    pub number_of_installments: i32,
    pub monthly_interest_rate: Rate,
    pub monthly_installment: Money,
    pub created_at: DateTime<Utc>,
    pub total_interest: Money,
    pub total_to_pay: Money,
    pub interest_percentage: Decimal,
}

fn percentage_to_decimal(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::InvalidAmount(value.to_string()));
    }
    // -0.0 + 0.0 == +0.0
    Decimal::from_f64(value + 0.0)
        .map(|d| round_half_away(d, 2))
        .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_price_scenario() {
        let result = quote(&SimulationParameters::new(10_000.0, 0.0349, 12)).unwrap();

        assert_eq!(result.monthly_installment.amount(), dec!(1034.23));
        assert_eq!(result.total_to_pay.amount(), dec!(12410.76));
        assert_eq!(result.total_interest.amount(), dec!(2410.76));
        assert_eq!(result.interest_percentage, dec!(24.11));
    }

    #[test]
    fn test_quote_zero_rate_drift() {
        let result = quote(&SimulationParameters::new(5_000.0, 0.0, 6)).unwrap();

        assert_eq!(result.monthly_installment.amount(), dec!(833.33));
        assert_eq!(result.total_to_pay.amount(), dec!(4999.98));
        assert_eq!(result.total_interest.amount(), dec!(-0.02));
        assert_eq!(result.interest_percentage, dec!(0));
    }

    #[test]
    fn test_quote_rejects_invalid_parameters() {
        let err = quote(&SimulationParameters::new(20_000.0, 0.20, 24)).unwrap_err();
        let result = err.validation_result().expect("validation failure");
        assert!(result.messages().iter().any(|m| m.contains("15%")));
    }

    #[test]
    fn test_create_stores_rounded_installment() {
        let student = StudentId::new();
        let sim = FinancingSimulation::create(student, &SimulationParameters::new(10_000.0, 0.0349, 12))
            .unwrap();

        assert_eq!(sim.student_id, student);
        assert_eq!(sim.monthly_installment.amount(), dec!(1034.23));
        assert_eq!(sim.monthly_interest_rate.as_decimal(), dec!(0.0349));
        assert_eq!(sim.result().unwrap().total_interest.amount(), dec!(2410.76));
    }

    #[test]
    fn test_view_carries_derived_figures() {
        let sim = FinancingSimulation::create(StudentId::new(), &SimulationParameters::new(5_000.0, 0.0, 6))
            .unwrap();
        let view = sim.view().unwrap();

        assert_eq!(view.id, sim.id);
        assert_eq!(view.total_to_pay.amount(), dec!(4999.98));
        assert_eq!(view.total_interest.amount(), dec!(-0.02));
        assert_eq!(view.interest_percentage, dec!(0));
    }

    #[test]
    fn test_installment_priced_from_stored_inputs() {
        let params = SimulationParameters::new(10_000.004, 0.03496, 12);
        let sim = FinancingSimulation::create(StudentId::new(), &params).unwrap();

        assert_eq!(sim.total_amount.amount(), dec!(10000.00));
        assert_eq!(sim.monthly_interest_rate.as_decimal(), dec!(0.0350));

        let stored = sim.parameters();
        let recomputed = compute_monthly_installment(
            stored.total_amount,
            stored.monthly_interest_rate,
            stored.number_of_installments,
        )
        .unwrap();
        assert_eq!(Money::from_f64(recomputed, Currency::BRL).unwrap(), sim.monthly_installment);

        assert_eq!(quote(&params).unwrap().monthly_installment, sim.monthly_installment);
        assert_eq!(quote(&stored).unwrap(), sim.result().unwrap());
    }

    #[test]
    fn test_parameters_round_trip() {
        let params = SimulationParameters::new(12_345.67, 0.015, 18);
        let sim = FinancingSimulation::create(StudentId::new(), &params).unwrap();
        assert_eq!(sim.parameters(), params);
    }
}
