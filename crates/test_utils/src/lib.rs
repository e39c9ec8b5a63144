//! Test Utilities Crate
//!
//! Shared test infrastructure for the financing simulator test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known-good inputs and worked loan scenarios
//! - `builders`: Builders for students, simulations and request bodies
//! - `database`: PostgreSQL test containers with migrations applied
//! - `assertions`: Assertion helpers for money and error bodies
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
