//! One-shot operator bootstrap, run once at startup.
//!
//! Public routes have no write access to the catalog; records are managed
//! by an operator account that this module guarantees exists.

use anyhow::Result;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use serde::Deserialize;

use crate::state::DBPool;

#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_email() -> String {
    "admin@example.com".to_string()
}

fn default_password() -> String {
    "admin123".to_string()
}

impl AdminConfig {
    pub fn from_env() -> Result<Self> {
        Ok(envy::prefixed("ADMIN_").from_env()?)
    }
}

/// Creates the operator account, or refreshes its e-mail and password if
/// it already exists. Safe to run on every startup.
pub async fn ensure_operator(pool: &DBPool, config: &AdminConfig) -> Result<()> {
    let password_hash = hash_password(&config.password)?;
    sqlx::query(
        r"INSERT INTO operators (username, email, password_hash)
          VALUES ($1, $2, $3)
          ON CONFLICT (username) DO UPDATE
          SET email         = EXCLUDED.email,
              password_hash = EXCLUDED.password_hash,
              updated_at    = now()",
    )
    .bind(&config.username)
    .bind(&config.email)
    .bind(&password_hash)
    .execute(pool)
    .await?;
    tracing::info!("operator account '{}' is ready", config.username);
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn config_defaults_when_unset() {
        let config: AdminConfig = envy::prefixed("ADMIN_")
            .from_iter(std::iter::empty())
            .unwrap();
        assert_eq!(config.username, "admin");
        assert_eq!(config.email, "admin@example.com");
        assert_eq!(config.password, "admin123");
    }

    #[test]
    fn config_from_environment() {
        let vars = [
            ("ADMIN_USERNAME".to_string(), "ops".to_string()),
            ("ADMIN_PASSWORD".to_string(), "hunter2".to_string()),
        ];
        let config: AdminConfig = envy::prefixed("ADMIN_").from_iter(vars).unwrap();
        assert_eq!(config.username, "ops");
        assert_eq!(config.email, "admin@example.com");
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter2").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"hunter2", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong", &parsed)
            .is_err());
    }
}
