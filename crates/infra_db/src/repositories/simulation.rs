//! Financing simulation repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, Money, PortError, Rate, SimulationId, StudentId,
};
use domain_simulation::{EvolutionPoint, FinancingSimulation, Page, PageRequest, SimulationPort};

use crate::error::DatabaseError;

/// A row of the `financing_simulations` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SimulationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub total_amount: Decimal,
    pub monthly_interest_rate: Decimal,
    pub number_of_installments: i32,
    pub monthly_installment: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<SimulationRow> for FinancingSimulation {
    fn from(row: SimulationRow) -> Self {
        FinancingSimulation {
            id: SimulationId::from_uuid(row.id),
            student_id: StudentId::from_uuid(row.student_id),
            total_amount: Money::brl(row.total_amount),
            monthly_interest_rate: Rate::new(row.monthly_interest_rate),
            number_of_installments: row.number_of_installments,
            monthly_installment: Money::brl(row.monthly_installment),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct EvolutionRow {
    created_at: DateTime<Utc>,
    total_amount: Decimal,
}

const SELECT_SIMULATION: &str = r#"
    SELECT id, student_id, total_amount, monthly_interest_rate,
           number_of_installments, monthly_installment, created_at
    FROM financing_simulations
"#;

/// PostgreSQL implementation of `SimulationPort`
#[derive(Debug, Clone)]
pub struct PgSimulationRepository {
    pool: PgPool,
}

impl PgSimulationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_for_student(&self, student_id: StudentId) -> Result<u64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM financing_simulations WHERE student_id = $1",
        )
        .bind(student_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        u64::try_from(count).map_err(|_| DatabaseError::Mapping(format!("Negative row count {}", count)))
    }
}

impl DomainPort for PgSimulationRepository {}

#[async_trait]
impl HealthCheckable for PgSimulationRepository {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-simulations").await
    }
}

#[async_trait]
impl SimulationPort for PgSimulationRepository {
    #[instrument(skip(self, simulation), fields(simulation_id = %simulation.id))]
    async fn save(&self, simulation: &FinancingSimulation) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO financing_simulations (
                id, student_id, total_amount, monthly_interest_rate,
                number_of_installments, monthly_installment, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(simulation.id.as_uuid())
        .bind(simulation.student_id.as_uuid())
        .bind(simulation.total_amount.amount())
        .bind(simulation.monthly_interest_rate.as_decimal())
        .bind(simulation.number_of_installments)
        .bind(simulation.monthly_installment.amount())
        .bind(simulation.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        debug!("Inserted financing simulation");
        Ok(())
    }

    #[instrument(skip(self), fields(student_id = %student_id, page = page.page, limit = page.limit))]
    async fn list_for_student(
        &self,
        student_id: StudentId,
        page: PageRequest,
    ) -> Result<Page<FinancingSimulation>, PortError> {
        let total_items = self.count_for_student(student_id).await?;

        let rows = sqlx::query_as::<_, SimulationRow>(&format!(
            "{SELECT_SIMULATION} WHERE student_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(student_id.as_uuid())
        .bind(i64::from(page.limit))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(Page {
            items: rows.into_iter().map(FinancingSimulation::from).collect(),
            total_items,
            request: page,
        })
    }

    async fn all_for_student(&self, student_id: StudentId) -> Result<Vec<FinancingSimulation>, PortError> {
        let rows = sqlx::query_as::<_, SimulationRow>(&format!("{SELECT_SIMULATION} WHERE student_id = $1"))
            .bind(student_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(FinancingSimulation::from).collect())
    }

    async fn evolution_for_student(&self, student_id: StudentId) -> Result<Vec<EvolutionPoint>, PortError> {
        let rows = sqlx::query_as::<_, EvolutionRow>(
            r#"
            SELECT created_at, total_amount
            FROM financing_simulations
            WHERE student_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(student_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| EvolutionPoint {
                created_at: row.created_at,
                total_amount: Money::brl(row.total_amount),
            })
            .collect())
    }
}
