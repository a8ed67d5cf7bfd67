use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Server database addressed by `DATABASE_URL`
    Postgres,
    /// Private in-memory SQLite; one connection, gone on drop
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown database kind '{other}' (expected postgres or sqlite-memory)"
            ))),
        }
    }
}

/// Connection URL for the given kind.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => must_var("DATABASE_URL"),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
