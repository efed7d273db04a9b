//! Password value object.
//!
//! Plain-text passwords only exist on the way in; everything stored or
//! returned is an Argon2 PHC string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{DUMMY_PASSWORD_HASH, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

/// Hashed password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if (plain_text.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Placeholder used when the login email does not exist, so the
    /// failing path still pays for one Argon2 verification.
    pub fn dummy() -> Self {
        Self::from_hash(DUMMY_PASSWORD_HASH)
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain-text password. Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = Password::new("12345678").unwrap();

        assert_ne!(password.as_str(), "12345678");
        assert!(password.verify("12345678"));
        assert!(!password.verify("87654321"));
    }

    #[test]
    fn test_restored_hash_verifies() {
        let hash = Password::new("juliana123").unwrap().into_string();
        assert!(Password::from_hash(hash).verify("juliana123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = Password::new("sabrina123").unwrap();
        let second = Password::new("sabrina123").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("sabrina123"));
        assert!(second.verify("sabrina123"));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Password::new("1234567"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_dummy_never_verifies() {
        assert!(!Password::dummy().verify("12345678"));
        assert!(!Password::from_hash("not-a-hash").verify("12345678"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("ricardo123").unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains(password.as_str()));
    }
}
