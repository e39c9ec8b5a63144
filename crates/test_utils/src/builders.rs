//! Test Data Builders
//!
//! Builders with sensible defaults, so tests only spell out the fields they
//! care about.

use chrono::{DateTime, Utc};
use core_kernel::StudentId;
use domain_simulation::{FinancingSimulation, SimulationParameters};
use domain_student::Student;
use serde_json::{json, Value};

use crate::fixtures::{StudentFixtures, VALID_PASSWORD, VALID_PASSWORD_HASH};

/// Builder for stored students
pub struct TestStudentBuilder {
    first_name: String,
    last_name: String,
    email: String,
    password_hash: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl Default for TestStudentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStudentBuilder {
    pub fn new() -> Self {
        Self {
            first_name: StudentFixtures::first_name().to_string(),
            last_name: StudentFixtures::last_name().to_string(),
            email: StudentFixtures::email().to_string(),
            password_hash: None,
            created_at: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Stores this exact hash instead of the fixture password's
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Builds the student; it logs in with `VALID_PASSWORD` unless a hash
    /// was given
    pub fn build(self) -> Student {
        let hash = self
            .password_hash
            .unwrap_or_else(|| VALID_PASSWORD_HASH.clone());
        let mut student = Student::new(self.first_name, self.last_name, &self.email, hash);
        if let Some(at) = self.created_at {
            student.created_at = at;
            student.updated_at = at;
        }
        student
    }
}

/// Builder for stored simulations
pub struct TestSimulationBuilder {
    student_id: StudentId,
    params: SimulationParameters,
    created_at: Option<DateTime<Utc>>,
}

impl TestSimulationBuilder {
    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id,
            params: SimulationParameters::new(10_000.0, 0.0349, 12),
            created_at: None,
        }
    }

    pub fn amount(mut self, total_amount: f64) -> Self {
        self.params.total_amount = total_amount;
        self
    }

    pub fn rate(mut self, monthly_interest_rate: f64) -> Self {
        self.params.monthly_interest_rate = monthly_interest_rate;
        self
    }

    pub fn installments(mut self, n: i32) -> Self {
        self.params.number_of_installments = n;
        self
    }

    pub fn params(mut self, params: SimulationParameters) -> Self {
        self.params = params;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// # Panics
    ///
    /// Panics if the parameters break the product rules
    pub fn build(self) -> FinancingSimulation {
        let mut simulation = FinancingSimulation::create(self.student_id, &self.params)
            .expect("builder parameters are within the product rules");
        if let Some(at) = self.created_at {
            simulation.created_at = at;
        }
        simulation
    }
}

/// JSON bodies for the HTTP endpoints
pub struct RequestBodies;

impl RequestBodies {
    /// Sign-up body for `email` with the fixture password
    pub fn registration(email: &str) -> Value {
        json!({
            "firstName": StudentFixtures::first_name(),
            "lastName": StudentFixtures::last_name(),
            "email": email,
            "password": VALID_PASSWORD,
            "confirmPassword": VALID_PASSWORD,
        })
    }

    pub fn login(email: &str, password: &str) -> Value {
        json!({ "email": email, "password": password })
    }

    pub fn simulation(params: &SimulationParameters) -> Value {
        json!({
            "totalAmount": params.total_amount,
            "numberOfInstallments": params.number_of_installments,
            "monthlyInterestRate": params.monthly_interest_rate,
        })
    }

    pub fn password_change(current: &str, new: &str) -> Value {
        json!({
            "currentPassword": current,
            "newPassword": new,
            "confirmNewPassword": new,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TemporalFixtures;

    #[test]
    fn test_student_builder_normalizes_email() {
        let student = TestStudentBuilder::new().with_email("  Bia@Example.COM ").build();
        assert_eq!(student.email, "bia@example.com");
        assert_eq!(student.full_name(), "Ana Souza");
    }

    #[test]
    fn test_simulation_builder_backdates() {
        let at = TemporalFixtures::days_before(10);
        let sim = TestSimulationBuilder::for_student(StudentId::new())
            .amount(6_000.0)
            .created_at(at)
            .build();

        assert_eq!(sim.created_at, at);
        assert_eq!(sim.total_amount.to_f64(), 6_000.0);
    }

    #[test]
    fn test_registration_body_is_camel_case() {
        let body = RequestBodies::registration("x@example.com");
        assert_eq!(body["confirmPassword"], VALID_PASSWORD);
    }
}
