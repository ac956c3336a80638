//! # Password Hashing
//!
//! Accounts never store the plain-text password. Registration stores an
//! argon2 PHC string; login verifies against it.
//!
//! Both operations are CPU-bound (tens of milliseconds), so the async
//! wrappers move them onto tokio's blocking pool.
//!
//! A login for an unknown email still runs one verification, against a
//! stand-in hash, so response time does not reveal whether an account
//! exists.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{DbError, DbResult};

/// Plain text behind the stand-in hash. Never accepted as a login.
const STAND_IN_PASSWORD: &str = "booknest-no-such-account";

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// corrupt row reads as "invalid credentials".
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash verified when no account matched, computed on first use.
fn stand_in_hash() -> &'static str {
    static STAND_IN_HASH: OnceLock<String> = OnceLock::new();
    STAND_IN_HASH.get_or_init(|| match hash_password(STAND_IN_PASSWORD) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to prepare stand-in hash: {}", e);
            String::new()
        }
    })
}

/// Verifies a password against the stored hash of the matched account.
///
/// With no account (`stored` is `None`) the password is verified against
/// the stand-in hash and the result is always `false`.
pub fn verify_stored(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = verify_password(password, stand_in_hash());
            false
        }
    }
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> DbResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DbError::Internal(format!("Hashing task failed: {}", e)))?
}

/// [`verify_stored`] on the blocking pool.
pub async fn verify_stored_blocking(password: String, stored: Option<String>) -> DbResult<bool> {
    tokio::task::spawn_blocking(move || verify_stored(&password, stored.as_deref()))
        .await
        .map_err(|e| DbError::Internal(format!("Verification task failed: {}", e)))
}
