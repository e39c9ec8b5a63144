//! Auth DTOs
//!
//! Sign-up and login bodies deserialize straight into the domain commands
//! (`RegisterStudent`, `LoginCredentials`); only responses live here.

use serde::Serialize;

use super::student::StudentResponse;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub student: StudentResponse,
}
