//! Repository implementations for the domain ports
//!
//! Each repository encapsulates its SQL, maps rows into domain types and
//! implements the matching port trait directly.

pub mod student;
pub mod simulation;

pub use student::PgStudentRepository;
pub use simulation::PgSimulationRepository;

use core_kernel::HealthCheckResult;
use sqlx::PgPool;

/// Runs `SELECT 1` and reports latency
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}
