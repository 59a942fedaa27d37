//! Password hashing and verification.
//!
//! Argon2id with the crate's default cost parameters, which are recorded in the PHC string so
//! existing hashes keep verifying if the defaults change. Hashing runs on the blocking pool.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use thiserror::Error;
use tokio::task::{self, JoinError};

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(HashError),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(HashError),

    #[error("password hashing task did not complete")]
    Task(#[source] JoinError),
}

/// Hash checked when a login names no account, so both paths pay for one Argon2 run.
static MISSING_ACCOUNT_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash `password` into a salted PHC string.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_blocking(password.as_bytes()))
        .await
        .map_err(PasswordError::Task)?
}

/// Check `password` against a stored PHC hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash).map_err(PasswordError::MalformedHash)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(error) => Err(PasswordError::Hash(error)),
        }
    })
    .await
    .map_err(PasswordError::Task)?
}

/// Run a verification that can never succeed, for logins whose email matched no account.
pub async fn verify_missing_account(password: String) -> Result<(), PasswordError> {
    task::spawn_blocking(move || {
        let hash = MISSING_ACCOUNT_HASH
            .get_or_init(|| hash_blocking(b"bazaar-missing-account").ok())
            .as_deref()
            .ok_or(PasswordError::Hash(HashError::Crypto))?;

        let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) | Err(HashError::Password) => Ok(()),
            Err(error) => Err(PasswordError::Hash(error)),
        }
    })
    .await
    .map_err(PasswordError::Task)?
}

fn hash_blocking(password: &[u8]) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password, &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}
