//! Student repository
//!
//! Emails are stored normalized, and the `students_email_key` unique index
//! backs the duplicate-email check against concurrent sign-ups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, StudentId};
use domain_student::{Student, StudentPort};

use crate::error::DatabaseError;

/// A row of the `students` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: StudentId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_STUDENT: &str = r#"
    SELECT id, first_name, last_name, email, password_hash, created_at, updated_at
    FROM students
"#;

/// PostgreSQL implementation of `StudentPort`
#[derive(Debug, Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, student: &Student) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO students (id, first_name, last_name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(student.id.as_uuid())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(student.created_at)
        .bind(student.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => DatabaseError::duplicate("Student", "email", &student.email),
            other => other,
        })?;

        Ok(())
    }
}

impl DomainPort for PgStudentRepository {}

#[async_trait]
impl HealthCheckable for PgStudentRepository {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-students").await
    }
}

#[async_trait]
impl StudentPort for PgStudentRepository {
    #[instrument(skip(self, student), fields(student_id = %student.id))]
    async fn create(&self, student: &Student) -> Result<(), PortError> {
        self.insert(student).await?;
        debug!("Inserted student");
        Ok(())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!("{SELECT_STUDENT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row.map(Student::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, PortError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!("{SELECT_STUDENT} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row.map(Student::from))
    }

    async fn email_taken_by_other(&self, email: &str, except: StudentId) -> Result<bool, PortError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM students WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(except.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(taken)
    }

    #[instrument(skip(self, student), fields(student_id = %student.id))]
    async fn update_profile(&self, student: &Student) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET first_name = $2, last_name = $3, email = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(student.id.as_uuid())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(student.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Student", student.id).into());
        }
        Ok(())
    }

    #[instrument(skip(self, password_hash), fields(student_id = %id))]
    async fn update_password(&self, id: StudentId, password_hash: &str) -> Result<(), PortError> {
        let result = sqlx::query(
            "UPDATE students SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Student", id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_student() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let student = Student::from(StudentRow {
            id,
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            password_hash: "$argon2id$...".into(),
            created_at: now,
            updated_at: now,
        });

        assert_eq!(student.id, StudentId::from_uuid(id));
        assert_eq!(student.password_hash, "$argon2id$...");
    }
}
