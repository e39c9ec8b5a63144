//! Dashboard aggregates over a student's simulation history

use chrono::{DateTime, Utc};
use core_kernel::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::simulation::FinancingSimulation;

/// Totals shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_simulations: u64,
    pub total_financed: Money,
    pub total_interests: Money,
    /// Mean installment, or zero when there are no simulations
    pub average_installment: Money,
}

impl SimulationSummary {
    /// Aggregates a student's simulations
    pub fn from_simulations(simulations: &[FinancingSimulation]) -> Result<Self, SimulationError> {
        let count = simulations.len() as u64;

        let total_financed = Money::sum(simulations.iter().map(|s| &s.total_amount), Currency::BRL);

        let interests = simulations
            .iter()
            .map(FinancingSimulation::total_interest)
            .collect::<Result<Vec<_>, _>>()?;
        let total_interests = Money::sum(&interests, Currency::BRL);

        let average_installment = if count == 0 {
            Money::zero(Currency::BRL)
        } else {
            Money::sum(simulations.iter().map(|s| &s.monthly_installment), Currency::BRL)
                .divide(Decimal::from(count))?
        };

        Ok(Self {
            total_simulations: count,
            total_financed,
            total_interests,
            average_installment,
        })
    }
}

/// One point of the "amount financed over time" series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionPoint {
    pub created_at: DateTime<Utc>,
    pub total_amount: Money,
}

impl From<&FinancingSimulation> for EvolutionPoint {
    fn from(simulation: &FinancingSimulation) -> Self {
        Self {
            created_at: simulation.created_at,
            total_amount: simulation.total_amount,
        }
    }
}

/// Builds the evolution series, oldest first
pub fn evolution(simulations: &[FinancingSimulation]) -> Vec<EvolutionPoint> {
    let mut points: Vec<EvolutionPoint> = simulations.iter().map(EvolutionPoint::from).collect();
    points.sort_by_key(|p| p.created_at);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationParameters;
    use chrono::Duration;
    use core_kernel::StudentId;
    use rust_decimal_macros::dec;

    fn sim(amount: f64, rate: f64, n: i32) -> FinancingSimulation {
        FinancingSimulation::create(StudentId::new(), &SimulationParameters::new(amount, rate, n)).unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let summary = SimulationSummary::from_simulations(&[]).unwrap();
        assert_eq!(summary.total_simulations, 0);
        assert!(summary.total_financed.is_zero());
        assert!(summary.average_installment.is_zero());
    }

    #[test]
    fn test_summary_totals() {
        let sims = vec![sim(10_000.0, 0.0349, 12), sim(5_000.0, 0.0, 6)];
        let summary = SimulationSummary::from_simulations(&sims).unwrap();

        assert_eq!(summary.total_simulations, 2);
        assert_eq!(summary.total_financed.amount(), dec!(15000));
        assert_eq!(summary.total_interests.amount(), dec!(2410.74));
        // (1034.23 + 833.33) / 2 = 933.78
        assert_eq!(summary.average_installment.amount(), dec!(933.78));
    }

    #[test]
    fn test_evolution_is_oldest_first() {
        let mut newer = sim(6_000.0, 0.01, 10);
        let mut older = sim(7_000.0, 0.01, 10);
        older.created_at = newer.created_at - Duration::days(3);
        newer.created_at += Duration::seconds(1);

        let points = evolution(&[newer.clone(), older.clone()]);
        assert_eq!(points[0].total_amount, older.total_amount);
        assert_eq!(points[1].total_amount, newer.total_amount);
    }
}
