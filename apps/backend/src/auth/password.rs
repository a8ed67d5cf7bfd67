//! Salted password hashing (bcrypt).
//!
//! Hashing is CPU bound, so the async entry points move the work onto the
//! blocking pool and keep the actix workers free.

use tokio::task;

use crate::AppError;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hash with a fresh random salt; two calls never return the same string.
pub fn hash_password_blocking(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost).map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

/// `Ok(false)` on mismatch. Errors only when `stored` is not a bcrypt hash.
pub fn verify_password_blocking(password: &str, stored: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, stored)
        .map_err(|e| AppError::internal(format!("stored password hash is unusable: {e}")))
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    task::spawn_blocking(move || hash_password_blocking(&password, cost))
        .await
        .map_err(|e| AppError::internal(format!("hashing task failed: {e}")))?
}

pub async fn verify_password(password: &str, stored: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let stored = stored.to_owned();
    task::spawn_blocking(move || verify_password_blocking(&password, &stored))
        .await
        .map_err(|e| AppError::internal(format!("verify task failed: {e}")))?
}
