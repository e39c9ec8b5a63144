//! Core Kernel - Foundational types shared by the financing simulator
//!
//! This crate provides the building blocks used across the domain crates:
//! - Money and rate types with precise decimal arithmetic
//! - Strongly-typed identifiers for students and simulations
//! - Field-tagged validation results
//! - The port error type and marker traits for persistence adapters

pub mod money;
pub mod identifiers;
pub mod validation;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::{StudentId, SimulationId};
pub use validation::{FieldError, ValidationResult};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
