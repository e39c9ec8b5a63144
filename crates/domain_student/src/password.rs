//! Argon2id password hashing
//!
//! Hashes are PHC strings carrying their own salt and parameters, so
//! verification needs nothing but the stored string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::StudentError;

/// Hashes a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, StudentError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StudentError::Password(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored PHC hash
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, StudentError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| StudentError::Password(format!("Invalid stored hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(StudentError::Password(format!("Failed to verify password: {}", e))),
    }
}
