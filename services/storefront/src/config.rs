//! Service configuration loaded from environment variables

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Minimum length of the token signing secret, in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Where user documents are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Storefront settings
///
/// # Environment Variables
/// - `BIND_ADDRESS`: listen address (default: `0.0.0.0:5000`)
/// - `JWT_SECRET`: HMAC secret for identity tokens, required, at least 32 bytes
/// - `JWT_EXPIRY_SECONDS`: token lifetime (default: 86400)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: `postgres`)
/// - `PASSWORD_MEMORY_KIB`, `PASSWORD_ITERATIONS`, `PASSWORD_PARALLELISM`:
///   Argon2id cost (default: 19456, 2, 1)
/// - `LOGIN_MAX_ATTEMPTS`, `LOGIN_WINDOW_SECONDS`, `LOGIN_BAN_SECONDS`:
///   failed-login throttling (default: 5, 300, 900)
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub store_backend: StoreBackend,
    pub password_memory_kib: u32,
    pub password_iterations: u32,
    pub password_parallelism: u32,
    pub login_max_attempts: u32,
    pub login_window_seconds: u64,
    pub login_ban_seconds: u64,
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("jwt_expiry_seconds", 86_400_i64)?
            .set_default("store_backend", "postgres")?
            .set_default("password_memory_kib", 19_456_i64)?
            .set_default("password_iterations", 2_i64)?
            .set_default("password_parallelism", 1_i64)?
            .set_default("login_max_attempts", 5_i64)?
            .set_default("login_window_seconds", 300_i64)?
            .set_default("login_ban_seconds", 900_i64)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if settings.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "JWT_SECRET must be at least {} bytes long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if settings.jwt_expiry_seconds == 0 {
            return Err(ConfigError::Message(
                "JWT_EXPIRY_SECONDS must be greater than zero".to_string(),
            ));
        }

        Ok(settings)
    }
}
