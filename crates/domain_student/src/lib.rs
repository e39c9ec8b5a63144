//! Student Accounts Domain
//!
//! Students own financing simulations. This crate covers everything about
//! the account itself: the input rules for registration, login, profile
//! updates and password changes, Argon2 password hashing, the storage port
//! and the `StudentService` that ties them together.
//!
//! # Example
//!
//! ```rust
//! use domain_student::{RegisterStudent, StudentValidator};
//!
//! let request = RegisterStudent {
//!     first_name: "Ana".to_string(),
//!     last_name: "Souza".to_string(),
//!     email: "ana@example.com".to_string(),
//!     password: "s3cret-pass".to_string(),
//!     confirm_password: "s3cret-pass".to_string(),
//! };
//! assert!(StudentValidator::validate_registration(&request).is_valid);
//! ```

pub mod student;
pub mod validation;
pub mod password;
pub mod ports;
pub mod service;
pub mod error;

pub use student::{
    normalize_email, ChangePassword, LoginCredentials, ProfileUpdate, RegisterStudent, Student,
};
pub use validation::StudentValidator;
pub use service::StudentService;
pub use ports::StudentPort;
pub use error::StudentError;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockStudentPort;
