//! Password hashing collaborator.
//!
//! The account service only sees the `PasswordEncoder` trait; `Argon2Encoder`
//! is the production implementation (salted Argon2id, PHC string format).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashSettings;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// One-way password hashing and verification.
#[cfg_attr(test, automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hash a cleartext password into an opaque, self-describing string.
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Check a cleartext candidate against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; an unreadable hash is an error.
    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id password encoder.
#[derive(Clone)]
pub struct Argon2Encoder {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Encoder").finish_non_exhaustive()
    }
}

impl Argon2Encoder {
    /// Build an encoder with explicit cost parameters.
    ///
    /// # Errors
    /// Returns a hashing error if the parameters are outside Argon2's limits.
    pub fn new(settings: HashSettings) -> AppResult<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| AppError::hashing(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordEncoder for Argon2Encoder {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::hashing(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::hashing(format!("Invalid hash format: {}", e)))?;

        match self.argon2.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::hashing(format!("Password verify failed: {}", e))),
        }
    }
}
