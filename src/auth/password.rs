//! Credential hashing policy.
//!
//! Argon2 work runs on the blocking pool. Lookups for unknown accounts still
//! perform a full verification against a throwaway hash, so a failed login
//! costs the same whether or not the email exists.

use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;

lazy_static! {
    /// Hashed with the same parameters as real accounts; never matches a login.
    static ref DUMMY_HASH: Result<String, String> =
        hash_blocking("unknown-account-placeholder").map_err(|e| e.to_string());
}

fn hash_blocking(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))
}

fn verify_blocking(plain: &str, stored: Option<&str>) -> anyhow::Result<bool> {
    let (hash, known) = match stored {
        Some(h) => (h, true),
        None => (
            DUMMY_HASH
                .as_deref()
                .map_err(|e| anyhow::anyhow!("placeholder hash unavailable: {e}"))?,
            false,
        ),
    };
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("argon2 parse hash: {e}"))?;
    let matched = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok();
    Ok(known && matched)
}

/// Salted Argon2id hash in PHC string form.
pub async fn hash_password(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_blocking(&plain))
        .await
        .context("password hashing task")?
}

/// Checks `plain` against the stored hash of the account, or against the
/// placeholder when there is no account. `Ok(false)` on any mismatch; `Err`
/// only when the stored hash is unreadable.
pub async fn verify_password(plain: String, stored: Option<String>) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_blocking(&plain, stored.as_deref()))
        .await
        .context("password verification task")?
}
