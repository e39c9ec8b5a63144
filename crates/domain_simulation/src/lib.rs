//! Financing Simulation Domain
//!
//! This crate holds the only real arithmetic in the system: the fixed
//! installment (Price / French amortization) calculator and the figures
//! derived from it.
//!
//! # Layers
//!
//! - [`calculator`]: pure `f64` functions for the installment, total interest,
//!   total to pay and interest percentage
//! - [`validation`]: the product rules on amount, rate and term
//! - [`simulation`]: the persisted `FinancingSimulation` record and the
//!   derived `SimulationResult`
//! - [`summary`]: dashboard aggregates over a student's history
//! - [`ports`]: the storage port and its in-memory mock
//!
//! # Example
//!
//! ```rust
//! use domain_simulation::calculator::{compute_monthly_installment, compute_total_interest};
//!
//! let installment = compute_monthly_installment(10_000.0, 0.0349, 12).unwrap();
//! assert_eq!(installment, 1034.23);
//! assert_eq!(compute_total_interest(10_000.0, installment, 12), 2410.76);
//! ```

pub mod calculator;
pub mod validation;
pub mod simulation;
pub mod summary;
pub mod ports;
pub mod error;

pub use simulation::{quote, FinancingSimulation, SimulationParameters, SimulationResult, SimulationView};
pub use summary::{EvolutionPoint, SimulationSummary};
pub use validation::SimulationValidator;
pub use error::SimulationError;
pub use ports::{Page, PageRequest, SimulationPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockSimulationPort;
