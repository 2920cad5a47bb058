//! Password hashing
//!
//! Argon2id with a per-hash random salt. The output is a PHC string that
//! embeds algorithm, parameters and salt, so verification needs nothing but
//! the stored hash.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

fn password_hasher() -> Argon2<'static> {
    // Argon2id v0x13 at the crate defaults (19 MiB, t=2, p=1)
    Argon2::default()
}

/// Hash a plaintext password into a self-describing PHC string
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = password_hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored hash
///
/// A wrong password is `Ok(false)`. Only an unparseable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    Ok(password_hasher()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("Correct horse", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted_and_opaque() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, "p");
    }

    #[test]
    fn test_malformed_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("p", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
