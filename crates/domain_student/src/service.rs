//! Account flows over an injected `StudentPort`

use std::sync::Arc;

use core_kernel::{PortError, StudentId};
use tracing::{info, warn};

use crate::error::StudentError;
use crate::password::{hash_password, verify_password};
use crate::ports::StudentPort;
use crate::student::{
    normalize_email, ChangePassword, LoginCredentials, ProfileUpdate, RegisterStudent, Student,
};
use crate::validation::StudentValidator;

/// Registration, login and profile management
#[derive(Clone)]
pub struct StudentService {
    port: Arc<dyn StudentPort>,
}

impl StudentService {
    pub fn new(port: Arc<dyn StudentPort>) -> Self {
        Self { port }
    }

    /// Creates an account
    ///
    /// # Errors
    ///
    /// `ValidationFailed` for bad input, `EmailTaken` when the email is
    /// already registered.
    pub async fn register(&self, input: RegisterStudent) -> Result<Student, StudentError> {
        StudentValidator::validate_registration(&input).into_result()?;

        let email = normalize_email(&input.email);
        if self.port.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Registration rejected, email already registered");
            return Err(StudentError::EmailTaken(email));
        }

        let password_hash = hash_blocking(input.password).await?;
        let student = Student::new(input.first_name, input.last_name, &email, password_hash);

        // A concurrent sign-up can still win the unique index.
        self.port.create(&student).await.map_err(|e| match e {
            PortError::Conflict { .. } => StudentError::EmailTaken(email.clone()),
            other => StudentError::Port(other),
        })?;

        info!(student_id = %student.id, "Registered student");
        Ok(student)
    }

    /// Checks credentials, returning the matching account
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(&self, credentials: LoginCredentials) -> Result<Student, StudentError> {
        StudentValidator::validate_login(&credentials).into_result()?;

        let email = normalize_email(&credentials.email);
        let Some(student) = self.port.find_by_email(&email).await? else {
            warn!(email = %email, "Login failed, unknown email");
            return Err(StudentError::InvalidCredentials);
        };

        if !verify_blocking(credentials.password, student.password_hash.clone()).await? {
            warn!(student_id = %student.id, "Login failed, wrong password");
            return Err(StudentError::InvalidCredentials);
        }

        info!(student_id = %student.id, "Student authenticated");
        Ok(student)
    }

    pub async fn profile(&self, id: StudentId) -> Result<Student, StudentError> {
        self.port
            .find_by_id(id)
            .await?
            .ok_or_else(|| StudentError::NotFound(id.to_string()))
    }

    /// Updates names and, optionally, the email
    pub async fn update_profile(
        &self,
        id: StudentId,
        update: ProfileUpdate,
    ) -> Result<Student, StudentError> {
        StudentValidator::validate_profile_update(&update).into_result()?;

        if let Some(email) = &update.email {
            let email = normalize_email(email);
            if self.port.email_taken_by_other(&email, id).await? {
                warn!(student_id = %id, "Profile update rejected, email in use");
                return Err(StudentError::EmailTaken(email));
            }
        }

        let mut student = self.profile(id).await?;
        student.apply(&update);
        self.port.update_profile(&student).await.map_err(|e| match e {
            PortError::Conflict { .. } => StudentError::EmailTaken(student.email.clone()),
            other => StudentError::Port(other),
        })?;

        info!(student_id = %id, "Updated student profile");
        Ok(student)
    }

    /// Replaces the password after verifying the current one
    pub async fn change_password(
        &self,
        id: StudentId,
        input: ChangePassword,
    ) -> Result<(), StudentError> {
        StudentValidator::validate_password_change(&input).into_result()?;

        let student = self.profile(id).await?;
        if !verify_blocking(input.current_password, student.password_hash).await? {
            warn!(student_id = %id, "Password change rejected, current password incorrect");
            return Err(StudentError::IncorrectPassword);
        }

        let password_hash = hash_blocking(input.new_password).await?;
        self.port.update_password(id, &password_hash).await?;

        info!(student_id = %id, "Changed student password");
        Ok(())
    }

    /// Reports the health of the underlying store
    pub async fn health_check(&self) -> core_kernel::HealthCheckResult {
        self.port.health_check().await
    }
}

// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_blocking(password: String) -> Result<String, StudentError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| StudentError::Password(e.to_string()))?
}

async fn verify_blocking(password: String, stored_hash: String) -> Result<bool, StudentError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| StudentError::Password(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockStudentPort;

    fn service() -> (StudentService, MockStudentPort) {
        let port = MockStudentPort::new();
        (StudentService::new(Arc::new(port.clone())), port)
    }

    fn registration(email: &str) -> RegisterStudent {
        RegisterStudent {
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: email.into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }
    }

    fn login(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let (service, _) = service();
        let student = service.register(registration(" Ana@Example.com")).await.unwrap();
        assert_eq!(student.email, "ana@example.com");
        assert_ne!(student.password_hash, "password1");

        let logged_in = service.authenticate(login("ana@example.com", "password1")).await.unwrap();
        assert_eq!(logged_in.id, student.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (service, _) = service();
        service.register(registration("ana@example.com")).await.unwrap();

        let err = service.register(registration("ANA@example.com")).await.unwrap_err();
        assert!(matches!(err, StudentError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_invalid_registration_touches_nothing() {
        let (service, port) = service();
        let mut input = registration("ana@example.com");
        input.confirm_password = "other-password".into();

        let err = service.register(input).await.unwrap_err();
        assert!(err.validation_result().unwrap().has_error_for("confirmPassword"));
        assert!(port.find_by_email("ana@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_look_the_same() {
        let (service, _) = service();
        service.register(registration("ana@example.com")).await.unwrap();

        let unknown = service.authenticate(login("bob@example.com", "password1")).await;
        let wrong = service.authenticate(login("ana@example.com", "password2")).await;
        assert!(matches!(unknown, Err(StudentError::InvalidCredentials)));
        assert!(matches!(wrong, Err(StudentError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_foreign_email() {
        let (service, _) = service();
        let ana = service.register(registration("ana@example.com")).await.unwrap();
        service.register(registration("bia@example.com")).await.unwrap();

        let clash = ProfileUpdate {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: Some("bia@example.com".into()),
        };
        let err = service.update_profile(ana.id, clash).await.unwrap_err();
        assert!(matches!(err, StudentError::EmailTaken(_)));

        // Re-submitting one's own email is fine
        let own = ProfileUpdate {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: Some("ana@example.com".into()),
        };
        let updated = service.update_profile(ana.id, own).await.unwrap();
        assert_eq!(updated.last_name, "Lima");
        assert_eq!(service.profile(ana.id).await.unwrap().last_name, "Lima");
    }

    #[tokio::test]
    async fn test_change_password() {
        let (service, _) = service();
        let ana = service.register(registration("ana@example.com")).await.unwrap();

        let wrong_current = ChangePassword {
            current_password: "nope-nope".into(),
            new_password: "brand-new-pass".into(),
            confirm_new_password: "brand-new-pass".into(),
        };
        assert!(matches!(
            service.change_password(ana.id, wrong_current).await,
            Err(StudentError::IncorrectPassword)
        ));

        let change = ChangePassword {
            current_password: "password1".into(),
            new_password: "brand-new-pass".into(),
            confirm_new_password: "brand-new-pass".into(),
        };
        service.change_password(ana.id, change).await.unwrap();

        assert!(service.authenticate(login("ana@example.com", "brand-new-pass")).await.is_ok());
        assert!(service.authenticate(login("ana@example.com", "password1")).await.is_err());
    }

    #[tokio::test]
    async fn test_profile_of_unknown_student() {
        let (service, _) = service();
        assert!(matches!(
            service.profile(StudentId::new()).await,
            Err(StudentError::NotFound(_))
        ));
    }
}
