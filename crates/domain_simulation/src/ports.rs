//! Simulation Domain Ports
//!
//! `SimulationPort` is everything the simulation handlers need from storage.
//! The PostgreSQL adapter lives in `infra_db`; an in-memory mock is provided
//! here behind the `mock` feature.
//!
//! ```rust,ignore
//! let port: Arc<dyn SimulationPort> = Arc::new(PgSimulationRepository::new(pool));
//! port.save(&simulation).await?;
//! let page = port.list_for_student(student_id, PageRequest::new(Some(1), Some(10))).await?;
//! ```

use async_trait::async_trait;
use core_kernel::{DomainPort, HealthCheckable, PortError, StudentId};

use crate::simulation::FinancingSimulation;
use crate::summary::EvolutionPoint;

/// Page size used when the caller gives none
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size a caller may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination request, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Builds a request, falling back to page 1 and the default size for
    /// missing or zero values and capping the size at `MAX_PAGE_SIZE`
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.request.limit))
    }

    /// Applies `f` to every item, keeping the pagination metadata
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?,
            total_items: self.total_items,
            request: self.request,
        })
    }
}

/// Storage port for financing simulations
#[async_trait]
pub trait SimulationPort: DomainPort + HealthCheckable {
    /// Persists a newly created simulation
    async fn save(&self, simulation: &FinancingSimulation) -> Result<(), PortError>;

    /// Lists a student's simulations, newest first
    async fn list_for_student(
        &self,
        student_id: StudentId,
        page: PageRequest,
    ) -> Result<Page<FinancingSimulation>, PortError>;

    /// Returns every simulation of a student, in no particular order
    async fn all_for_student(&self, student_id: StudentId) -> Result<Vec<FinancingSimulation>, PortError>;

    /// Returns the amount financed over time, oldest first
    async fn evolution_for_student(&self, student_id: StudentId) -> Result<Vec<EvolutionPoint>, PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{HealthCheckResult, SimulationId};

    use crate::summary::evolution;

    /// In-memory simulation store
    #[derive(Debug, Clone, Default)]
    pub struct MockSimulationPort {
        simulations: Arc<RwLock<HashMap<SimulationId, FinancingSimulation>>>,
    }

    impl MockSimulationPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds the store directly, keeping the given timestamps
        pub async fn insert(&self, simulation: FinancingSimulation) {
            self.simulations.write().await.insert(simulation.id, simulation);
        }

        /// Number of stored simulations across all students
        pub async fn len(&self) -> usize {
            self.simulations.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }

        async fn for_student(&self, student_id: StudentId) -> Vec<FinancingSimulation> {
            self.simulations
                .read()
                .await
                .values()
                .filter(|s| s.student_id == student_id)
                .cloned()
                .collect()
        }
    }

    impl DomainPort for MockSimulationPort {}

    #[async_trait]
    impl HealthCheckable for MockSimulationPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock_simulations", 0)
        }
    }

    #[async_trait]
    impl SimulationPort for MockSimulationPort {
        async fn save(&self, simulation: &FinancingSimulation) -> Result<(), PortError> {
            let mut simulations = self.simulations.write().await;
            if simulations.contains_key(&simulation.id) {
                return Err(PortError::conflict(format!("Simulation {} already exists", simulation.id)));
            }
            simulations.insert(simulation.id, simulation.clone());
            Ok(())
        }

        async fn list_for_student(
            &self,
            student_id: StudentId,
            page: PageRequest,
        ) -> Result<Page<FinancingSimulation>, PortError> {
            let mut rows = self.for_student(student_id).await;
            rows.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
            });

            let total_items = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit as usize)
                .collect();

            Ok(Page {
                items,
                total_items,
                request: page,
            })
        }

        async fn all_for_student(&self, student_id: StudentId) -> Result<Vec<FinancingSimulation>, PortError> {
            Ok(self.for_student(student_id).await)
        }

        async fn evolution_for_student(&self, student_id: StudentId) -> Result<Vec<EvolutionPoint>, PortError> {
            Ok(evolution(&self.for_student(student_id).await))
        }
    }
}
