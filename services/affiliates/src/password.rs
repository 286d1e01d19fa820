//! Password hashing using Argon2id.

use anyhow::{Context as _, anyhow};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash a password into a PHC string (Argon2id, m=19 MiB, t=2, p=1, random salt).
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("hash password: {e}"))
}

/// Verify a password against a stored PHC string.
///
/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("invalid password hash: {e}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("verify password: {e}")),
    }
}

/// Well-formed Argon2id hash that no password produces. Checked when the
/// account does not exist so both login failures do the same work.
const UNMATCHABLE_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1",
    "$YmV0ZW5naW5lLWR1bW15IQ",
    "$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8",
);

/// [`hash_password`] on the blocking pool.
pub async fn hash_in_background(password: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task")?
}

/// [`verify_password`] on the blocking pool. `None` runs a full verification
/// against [`UNMATCHABLE_HASH`] and always yields `Ok(false)`.
pub async fn verify_in_background(
    password: String,
    stored_hash: Option<String>,
) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        let hash = stored_hash.as_deref().unwrap_or(UNMATCHABLE_HASH);
        let matched = verify_password(&password, hash)?;
        Ok(matched && stored_hash.is_some())
    })
    .await
    .context("password verification task")?
}
