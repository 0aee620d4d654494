//! Argon2id password hashing
//!
//! Both operations run on tokio's blocking pool.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};

/// Argon2id hasher with a configurable work factor
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the given memory cost (KiB), iterations and lanes
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| anyhow::anyhow!("Invalid password hashing parameters: {}", e))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt into a PHC string
    pub async fn hash(&self, password: String) -> Result<String> {
        let argon2 = self.argon2();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand::thread_rng());
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
        })
        .await
        .context("Password hashing task failed")?
    }

    /// Check a password against a stored PHC string
    ///
    /// The cost parameters embedded in the hash are used, so hashes created
    /// under older settings keep verifying.
    pub async fn verify(&self, password: String, password_hash: String) -> Result<bool> {
        let argon2 = self.argon2();
        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;
            Ok(argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .context("Password verification task failed")?
    }
}
