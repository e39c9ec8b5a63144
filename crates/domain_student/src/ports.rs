//! Student Domain Ports
//!
//! `StudentPort` is the account store. `infra_db` provides the PostgreSQL
//! adapter; the in-memory mock below backs unit and HTTP tests.
//!
//! Emails passed to the port are already normalized.

use async_trait::async_trait;
use core_kernel::{DomainPort, HealthCheckable, PortError, StudentId};

use crate::student::Student;

/// Storage port for student accounts
#[async_trait]
pub trait StudentPort: DomainPort + HealthCheckable {
    /// Inserts a new account; a duplicate email is `PortError::Conflict`
    async fn create(&self, student: &Student) -> Result<(), PortError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, PortError>;

    /// Returns true when `email` belongs to an account other than `except`
    async fn email_taken_by_other(&self, email: &str, except: StudentId) -> Result<bool, PortError>;

    /// Stores names, email and `updated_at`
    async fn update_profile(&self, student: &Student) -> Result<(), PortError>;

    /// Replaces the password hash
    async fn update_password(&self, id: StudentId, password_hash: &str) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use chrono::Utc;
    use core_kernel::HealthCheckResult;

    /// In-memory student store
    #[derive(Debug, Clone, Default)]
    pub struct MockStudentPort {
        students: Arc<RwLock<HashMap<StudentId, Student>>>,
    }

    impl MockStudentPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds the store directly, bypassing the uniqueness check
        pub async fn insert(&self, student: Student) {
            self.students.write().await.insert(student.id, student);
        }
    }

    impl DomainPort for MockStudentPort {}

    #[async_trait]
    impl HealthCheckable for MockStudentPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock_students", 0)
        }
    }

    #[async_trait]
    impl StudentPort for MockStudentPort {
        async fn create(&self, student: &Student) -> Result<(), PortError> {
            let mut students = self.students.write().await;
            if students.values().any(|s| s.email == student.email) {
                return Err(PortError::conflict(format!("Email {} already registered", student.email)));
            }
            students.insert(student.id, student.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError> {
            Ok(self.students.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Student>, PortError> {
            Ok(self
                .students
                .read()
                .await
                .values()
                .find(|s| s.email == email)
                .cloned())
        }

        async fn email_taken_by_other(&self, email: &str, except: StudentId) -> Result<bool, PortError> {
            Ok(self
                .students
                .read()
                .await
                .values()
                .any(|s| s.email == email && s.id != except))
        }

        async fn update_profile(&self, student: &Student) -> Result<(), PortError> {
            let mut students = self.students.write().await;
            let stored = students
                .get_mut(&student.id)
                .ok_or_else(|| PortError::not_found("Student", student.id))?;
            stored.first_name = student.first_name.clone();
            stored.last_name = student.last_name.clone();
            stored.email = student.email.clone();
            stored.updated_at = student.updated_at;
            Ok(())
        }

        async fn update_password(&self, id: StudentId, password_hash: &str) -> Result<(), PortError> {
            let mut students = self.students.write().await;
            let stored = students
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Student", id))?;
            stored.password_hash = password_hash.to_string();
            stored.updated_at = Utc::now();
            Ok(())
        }
    }
}
