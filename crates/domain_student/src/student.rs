//! Student accounts and the commands that act on them

use chrono::{DateTime, Utc};
use core_kernel::StudentId;
use serde::{Deserialize, Serialize};

/// A registered student
///
/// The password hash never leaves the process through serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a new account from already validated input
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: &str,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: StudentId::new_v7(),
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: normalize_email(email),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a profile update, keeping the current email when none is given
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.first_name = update.first_name.trim().to_string();
        self.last_name = update.last_name.trim().to_string();
        if let Some(email) = &update.email {
            self.email = normalize_email(email);
        }
        self.updated_at = Utc::now();
    }
}

/// Trims and lower-cases an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sign-up form
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Profile edit; a missing email leaves the stored one untouched
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_input() {
        let student = Student::new(" Ana ", "Souza", "  Ana@Example.COM ", "hash".into());
        assert_eq!(student.first_name, "Ana");
        assert_eq!(student.email, "ana@example.com");
        assert_eq!(student.created_at, student.updated_at);
        assert_eq!(student.full_name(), "Ana Souza");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let student = Student::new("Ana", "Souza", "ana@example.com", "secret-hash".into());
        let json = serde_json::to_value(&student).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Ana");
        assert!(!json.to_string().contains("secret-hash"));
    }

    #[test]
    fn test_apply_keeps_email_when_absent() {
        let mut student = Student::new("Ana", "Souza", "ana@example.com", "hash".into());
        student.apply(&ProfileUpdate {
            first_name: "Ana Maria".into(),
            last_name: "Souza".into(),
            email: None,
        });

        assert_eq!(student.first_name, "Ana Maria");
        assert_eq!(student.email, "ana@example.com");
        assert!(student.updated_at >= student.created_at);
    }
}
