//! Argon2id credential hashing for user records.

use super::{WriteHook, WriteMode};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use serde_json::Value;
use std::collections::HashMap;

pub const PASSWORD_INPUT: &str = "password";
pub const PASSWORD_HASH_COLUMN: &str = "password_hash";
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password into a PHC string. Runs on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Credential(format!("failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::Credential(format!("hashing task failed: {}", e)))?
}

/// Check a plaintext password against a stored PHC string.
pub async fn verify_password(password: &str, phc: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let phc = phc.to_string();
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&phc)
            .map_err(|e| AppError::Credential(format!("invalid password hash: {}", e)))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Credential(format!("verification failed: {}", e))),
        }
    })
    .await
    .map_err(|e| AppError::Credential(format!("verification task failed: {}", e)))?
}

/// Turns the write-only `password` input into `password_hash`.
pub struct CredentialHook;

#[async_trait]
impl WriteHook for CredentialHook {
    fn inputs(&self) -> &'static [&'static str] {
        &[PASSWORD_INPUT]
    }

    async fn prepare(&self, body: &mut HashMap<String, Value>, mode: WriteMode) -> Result<(), AppError> {
        let password = match body.remove(PASSWORD_INPUT) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None if mode == WriteMode::Update => return Ok(()),
            Some(Value::Null) | None => {
                return Err(AppError::Validation(format!("{} is required", PASSWORD_INPUT)))
            }
            Some(_) => {
                return Err(AppError::Validation(format!("{} must be a string", PASSWORD_INPUT)))
            }
        };
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                PASSWORD_INPUT, MIN_PASSWORD_LEN
            )));
        }
        let phc = hash_password(&password).await?;
        body.insert(PASSWORD_HASH_COLUMN.to_string(), Value::String(phc));
        Ok(())
    }
}
