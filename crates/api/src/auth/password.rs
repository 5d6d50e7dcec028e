//! Password hashing and strength checks.
//!
//! Passwords are hashed with Argon2id using a per-password random salt
//! and stored in PHC string format, so the parameters and salt travel
//! with the hash and verification needs no extra configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password. Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Reject passwords below [`MIN_PASSWORD_LENGTH`].
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_uses_argon2id() {
        let hash = hash_password("sup3r-secret!").expect("hashing succeeds");
        assert!(hash.starts_with("$argon2id$"), "PHC string with argon2id id");
        assert!(verify_password("sup3r-secret!", &hash).expect("verify succeeds"));
    }

    #[test]
    fn wrong_password_is_ok_false() {
        let hash = hash_password("the-real-one").expect("hashing succeeds");
        assert!(!verify_password("a-guess", &hash).expect("verify succeeds"));
    }

    #[test]
    fn salts_are_random() {
        let a = hash_password("same-input").expect("hashing succeeds");
        let b = hash_password("same-input").expect("hashing succeeds");
        assert_ne!(a, b, "two hashes of one password must not collide");
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn length_floor_is_enforced() {
        let err = validate_password_strength("2short!").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(validate_password_strength("8chars!!").is_ok());
        assert!(validate_password_strength("plenty-long-passphrase").is_ok());
    }
}
