// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! Password hashing and verification.
//!
//! Passwords are stored as Argon2id PHC strings with a per-password random
//! salt. Verification delegates the comparison to the argon2 crate, which
//! is constant-time with respect to the guess. Both operations are CPU
//! bound; async callers should wrap them in `spawn_blocking`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::error::AuthError;

/// Derive a salted Argon2id hash of the password.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))?
        .to_string();
    Ok(phc)
}

/// Verify a password guess against a stored PHC hash.
///
/// An unparsable stored hash counts as a failed verification rather than an
/// error, so corrupt records cannot be distinguished from wrong passwords.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let phc = hash_password("pw1").unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(verify_password(&phc, "pw1"));
        assert!(!verify_password(&phc, "pw2"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "pw1"));
        assert!(!verify_password("", "pw1"));
    }
}
