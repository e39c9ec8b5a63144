//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the student and simulation ports, using SQLx.
//!
//! # Architecture
//!
//! Each repository owns a clone of the pool, reads rows into `FromRow`
//! structs and converts them into domain types. Storage errors surface as
//! `DatabaseError` internally and as `PortError` through the port traits.
//!
//! Only inputs and the monthly installment of a simulation are stored;
//! derived totals are recomputed by the domain on read.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PgStudentRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/financing")).await?;
//! run_migrations(&pool).await?;
//! let students = PgStudentRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{PgSimulationRepository, PgStudentRepository};
