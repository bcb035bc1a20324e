//! Password hashing.
//!
//! Argon2id with a random per-password salt; hashes are stored in the
//! PHC string format so parameters travel with the hash.

use crate::AuthError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Password hasher.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password into a PHC format string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        Self::validate_password(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    pub fn verify(&self, password: &str, hash_str: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash_str).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Validate password strength.
    pub fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "SecurePass123";

        let hash = hasher.hash(password).unwrap();
        assert!(hash.starts_with("$argon2"));

        assert!(hasher.verify(password, &hash).unwrap());
        assert!(!hasher.verify("WrongPassword", &hash).unwrap());
    }

    #[test]
    fn test_password_validation() {
        assert!(PasswordHasher::validate_password("secret").is_ok());
        assert!(PasswordHasher::validate_password("short").is_err());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = PasswordHasher::new();
        let password = "TestPassword1";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Random salts make every hash unique.
        assert_ne!(hash1, hash2);
        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_internal_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("whatever", "not-a-phc-string").is_err());
    }
}
