//! Input rules for student accounts
//!
//! Every check runs and every violation is reported, tagged with the
//! camelCase name of the offending field.

use core_kernel::ValidationResult;
use validator::ValidateEmail;

use crate::student::{ChangePassword, LoginCredentials, ProfileUpdate, RegisterStudent};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 25;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 22;

/// Validator for student commands
pub struct StudentValidator;

impl StudentValidator {
    pub fn validate_registration(input: &RegisterStudent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        check_name(&mut result, "firstName", "First name", &input.first_name);
        check_name(&mut result, "lastName", "Last name", &input.last_name);
        check_email(&mut result, &input.email);

        let password_len = input.password.chars().count();
        result.check(
            password_len >= PASSWORD_MIN_CHARS,
            "password",
            "Password must be at least 8 characters",
        );
        result.check(
            password_len <= PASSWORD_MAX_CHARS,
            "password",
            "Password cannot exceed 22 characters",
        );
        result.check(
            input.confirm_password == input.password,
            "confirmPassword",
            "Passwords do not match",
        );

        result
    }

    pub fn validate_login(input: &LoginCredentials) -> ValidationResult {
        let mut result = ValidationResult::ok();
        check_email(&mut result, &input.email);
        result.check(!input.password.is_empty(), "password", "Password is required");
        result
    }

    pub fn validate_profile_update(input: &ProfileUpdate) -> ValidationResult {
        let mut result = ValidationResult::ok();

        check_name(&mut result, "firstName", "First name", &input.first_name);
        check_name(&mut result, "lastName", "Last name", &input.last_name);
        if let Some(email) = &input.email {
            check_email(&mut result, email);
        }

        result
    }

    pub fn validate_password_change(input: &ChangePassword) -> ValidationResult {
        let mut result = ValidationResult::ok();

        result.check(
            !input.current_password.is_empty(),
            "currentPassword",
            "Current password is required",
        );
        result.check(
            input.new_password.chars().count() >= PASSWORD_MIN_CHARS,
            "newPassword",
            "New password must be at least 8 characters",
        );
        result.check(
            input.confirm_new_password.chars().count() >= PASSWORD_MIN_CHARS,
            "confirmNewPassword",
            "Password confirmation is required",
        );
        result.check(
            input.confirm_new_password == input.new_password,
            "confirmNewPassword",
            "Passwords do not match",
        );

        result
    }
}

fn check_name(result: &mut ValidationResult, field: &str, label: &str, value: &str) {
    let len = value.trim().chars().count();
    result.check(
        len >= NAME_MIN_CHARS,
        field,
        format!("{label} must be at least {NAME_MIN_CHARS} characters"),
    );
    result.check(
        len <= NAME_MAX_CHARS,
        field,
        format!("{label} cannot exceed {NAME_MAX_CHARS} characters"),
    );
}

fn check_email(result: &mut ValidationResult, email: &str) {
    result.check(email.trim().to_string().validate_email(), "email", "Invalid email format");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterStudent {
        RegisterStudent {
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(StudentValidator::validate_registration(&registration()).is_valid);
    }

    #[test]
    fn test_registration_collects_every_violation() {
        let mut input = registration();
        input.first_name = "A".into();
        input.email = "not-an-email".into();
        input.confirm_password = "different".into();

        let result = StudentValidator::validate_registration(&input);
        assert_eq!(result.errors.len(), 3);
        assert!(result.has_error_for("firstName"));
        assert!(result.has_error_for("email"));
        assert!(result.has_error_for("confirmPassword"));
    }

    #[test]
    fn test_password_length_bounds() {
        let mut input = registration();
        input.password = "a".repeat(23);
        input.confirm_password = input.password.clone();
        let result = StudentValidator::validate_registration(&input);
        assert_eq!(result.messages(), vec!["Password cannot exceed 22 characters"]);

        input.password = "a".repeat(22);
        input.confirm_password = input.password.clone();
        assert!(StudentValidator::validate_registration(&input).is_valid);
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut input = registration();
        input.last_name = "É".repeat(25);
        assert!(StudentValidator::validate_registration(&input).is_valid);
    }

    #[test]
    fn test_login_requires_password() {
        let result = StudentValidator::validate_login(&LoginCredentials {
            email: "ana@example.com".into(),
            password: String::new(),
        });
        assert_eq!(result.messages(), vec!["Password is required"]);
    }

    #[test]
    fn test_profile_update_email_is_optional() {
        let mut update = ProfileUpdate {
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: None,
        };
        assert!(StudentValidator::validate_profile_update(&update).is_valid);

        update.email = Some("broken@".into());
        assert!(StudentValidator::validate_profile_update(&update).has_error_for("email"));
    }

    #[test]
    fn test_password_change_mismatch() {
        let result = StudentValidator::validate_password_change(&ChangePassword {
            current_password: "old-password".into(),
            new_password: "new-password".into(),
            confirm_new_password: "new-passw0rd".into(),
        });
        assert_eq!(result.messages(), vec!["Passwords do not match"]);
    }
}
