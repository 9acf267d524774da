//! Credential storage and verification.
//!
//! Two storage schemes coexist in one user directory. `plaintext` keeps the
//! password as entered, which is what existing `users` blobs contain.
//! `argon2` stores an Argon2id PHC string with a random salt. Verification
//! looks at the stored value, so a directory may mix both: anything that is
//! not a well-formed Argon2 PHC string is compared as plaintext.

use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    Plaintext,
    Argon2,
}

impl FromStr for CredentialScheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(CredentialScheme::Plaintext),
            "argon2" => Ok(CredentialScheme::Argon2),
            other => Err(AppError::Config(format!(
                "CREDENTIAL_SCHEME must be 'plaintext' or 'argon2', got '{other}'"
            ))),
        }
    }
}

impl CredentialScheme {
    /// Produce the value stored in the user record for `password`.
    pub fn store(self, password: &str) -> AppResult<String> {
        match self {
            CredentialScheme::Plaintext => Ok(password.to_string()),
            CredentialScheme::Argon2 => hash_password(password)
                .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}"))),
        }
    }
}

/// Check `password` against a stored credential of either scheme.
pub fn verify_credential(password: &str, stored: &str) -> AppResult<bool> {
    match argon2_hash(stored) {
        Some(parsed) => verify_password(password, &parsed)
            .map_err(|e| AppError::Internal(format!("Stored password hash is unreadable: {e}"))),
        None => Ok(password == stored),
    }
}

/// Parse `stored` as a PHC string naming one of the Argon2 variants.
fn argon2_hash(stored: &str) -> Option<PasswordHash<'_>> {
    let parsed = PasswordHash::new(stored).ok()?;
    parsed
        .algorithm
        .as_str()
        .parse::<Algorithm>()
        .is_ok()
        .then_some(parsed)
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a parsed Argon2 PHC hash.
pub fn verify_password(
    password: &str,
    parsed: &PasswordHash<'_>,
) -> Result<bool, argon2::password_hash::Error> {
    match Argon2::default().verify_password(password.as_bytes(), parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enforce the minimum password length, counted in characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}
